//! Persistence layer.
//!
//! A single SQLite file holds the user directory, imported time entries, the
//! sync log and dashboard reviews. [`store::Store`] is the row source the
//! report façade reads from; [`snapshot`] fills it from JSON exports.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use utilboard::db::{db::Db, store::Store};
//! use utilboard::libs::config::ReportConfig;
//! use utilboard::libs::period::SystemClock;
//!
//! let store = Store::new(Db::new()?, Arc::new(SystemClock), ReportConfig::default());
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup.
pub mod db;

/// Versioned schema changes applied on open.
pub mod migrations;

/// JSON snapshot import.
pub mod snapshot;

/// SQLite implementation of the row source.
pub mod store;
