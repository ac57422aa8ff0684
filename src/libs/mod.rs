//! Core library modules.
//!
//! - **Shaping**: [`formatter`], [`period`], [`hierarchy`], [`distribution`]
//! - **Façade**: [`report`] over a [`source::RowSource`]
//! - **Infrastructure**: [`config`], [`data_storage`], [`error`], [`messages`], [`view`]

pub mod config;
pub mod data_storage;
pub mod distribution;
pub mod error;
pub mod formatter;
pub mod hierarchy;
pub mod messages;
pub mod models;
pub mod period;
pub mod report;
pub mod source;
pub mod view;
