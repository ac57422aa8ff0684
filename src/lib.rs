//! # utilboard
//!
//! Utilization reporting for teams that log their work on boards.
//!
//! Time entries (board, group, item, start time, duration) are imported into
//! a local SQLite store and shaped into reports: a board → group → item tree
//! for a date filter, each board's share of the hours, weekday and monthly
//! summaries against the team, weekend work, a weekly series and top
//! performer lists. Every report is returned as a tagged result that either
//! carries data or an error kind with a message.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use utilboard::libs::config::ReportConfig;
//! use utilboard::libs::models::TimeEntry;
//! use utilboard::libs::period::FixedClock;
//! use utilboard::libs::report::{IdentityPolicy, Reports};
//! use utilboard::libs::source::MemorySource;
//!
//! let clock = FixedClock::on(2024, 3, 13).unwrap();
//! let source = MemorySource::new();
//! source.add_entry("ann@example.com", TimeEntry::new("Board A", "G1", "x", clock.0, 1.5));
//!
//! let reports = Reports::new(source, Arc::new(clock), IdentityPolicy::default(), ReportConfig::default());
//! let boards = reports.entries("Today", Some("ann@example.com"));
//! assert_eq!(boards.data().unwrap()[0].formatted_duration, "1h 30m");
//! ```

pub mod commands;
pub mod db;
pub mod libs;
