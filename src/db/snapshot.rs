//! JSON snapshot import.
//!
//! The store is filled from an export of the upstream time tracker:
//!
//! ```json
//! {
//!   "users": [{ "userName": "Ann", "email": "ann@example.com", "userType": "Member", "team": "ES" }],
//!   "entries": [{
//!     "userEmail": "ann@example.com", "boardName": "Board A", "groupName": "G1",
//!     "itemName": "x", "categoryName": "Dev", "startTime": "2024-03-11T09:00:00", "durationHours": 0.5
//!   }]
//! }
//! ```
//!
//! Users are upserted by email. Each import records a row in `sync_log`,
//! which is what the latest-update report reads.

use super::store::Store;
use crate::libs::error::{SourceError, SourceResult};
use crate::libs::models::{TimeEntry, User};
use rusqlite::params;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry {
    pub user_email: String,
    #[serde(flatten)]
    pub entry: TimeEntry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub entries: usize,
}

impl Snapshot {
    pub fn from_json(json: &str) -> SourceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> SourceResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    fn validate(&self) -> SourceResult<()> {
        for item in &self.entries {
            let hours = item.entry.duration_hours;
            if !hours.is_finite() || hours < 0.0 {
                return Err(SourceError::Malformed(format!(
                    "entry '{}' of {} has duration {}",
                    item.entry.item_name, item.user_email, hours
                )));
            }
        }
        Ok(())
    }
}

impl Store {
    /// Loads `snapshot` in one transaction. With `replace`, existing entries are dropped first.
    pub fn import(&mut self, snapshot: &Snapshot, replace: bool) -> SourceResult<ImportSummary> {
        snapshot.validate()?;
        let synced_at = self.clock.now();

        let tx = self.db.conn.transaction()?;
        if replace {
            let removed = tx.execute("DELETE FROM entries", [])?;
            tracing::info!(removed, "existing entries cleared");
        }

        for user in &snapshot.users {
            tx.execute(
                "INSERT INTO users (email, user_name, user_type, team) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(email) DO UPDATE SET user_name = excluded.user_name, user_type = excluded.user_type, team = excluded.team",
                params![user.email, user.user_name, user.user_type, user.team],
            )?;
        }

        for item in &snapshot.entries {
            let entry = &item.entry;
            tx.execute(
                "INSERT INTO entries (user_email, board_name, group_name, item_name, category_name, start_time, duration_hours)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    item.user_email,
                    entry.board_name,
                    entry.group_name,
                    entry.item_name,
                    entry.category_name,
                    entry.start_time,
                    entry.duration_hours
                ],
            )?;
        }

        let summary = ImportSummary {
            users: snapshot.users.len(),
            entries: snapshot.entries.len(),
        };
        tx.execute(
            "INSERT INTO sync_log (synced_at, users, entries) VALUES (?1, ?2, ?3)",
            params![synced_at, summary.users as i64, summary.entries as i64],
        )?;
        tx.commit()?;

        tracing::info!(users = summary.users, entries = summary.entries, %synced_at, "snapshot imported");
        Ok(summary)
    }
}
