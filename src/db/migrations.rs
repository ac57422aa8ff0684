//! Versioned schema migrations.
//!
//! Migrations are registered in version order and applied inside a single
//! transaction when a [`super::db::Db`] is opened. Applied versions are
//! recorded in the `migrations` table.
//!
//! ```rust
//! use utilboard::db::migrations::{init_with_migrations, get_db_version};
//! use rusqlite::Connection;
//!
//! let mut conn = Connection::open_in_memory()?;
//! init_with_migrations(&mut conn)?;
//! assert!(get_db_version(&conn)? >= 1);
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all schema migrations.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: directory and time entries
        self.add_migration(1, "create_users_and_entries", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE,
        user_name TEXT NOT NULL,
        user_type TEXT NOT NULL DEFAULT 'Member',
        team TEXT
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY,
        user_email TEXT NOT NULL COLLATE NOCASE,
        board_name TEXT NOT NULL,
        group_name TEXT NOT NULL,
        item_name TEXT NOT NULL,
        category_name TEXT,
        start_time TIMESTAMP NOT NULL,
        duration_hours REAL NOT NULL
    )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_entries_user_start ON entries(user_email, start_time)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_entries_start ON entries(start_time)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_users_team ON users(team)", [])?;
            Ok(())
        });

        // Version 2: sync bookkeeping
        self.add_migration(2, "create_sync_log", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS sync_log (
        id INTEGER PRIMARY KEY,
        synced_at TIMESTAMP NOT NULL,
        users INTEGER NOT NULL DEFAULT 0,
        entries INTEGER NOT NULL DEFAULT 0
    )",
                [],
            )?;
            Ok(())
        });

        // Version 3: dashboard feedback
        self.add_migration(3, "create_reviews", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS reviews (
        id INTEGER PRIMARY KEY,
        user_email TEXT NOT NULL,
        stars INTEGER NOT NULL CHECK (stars BETWEEN 1 AND 5),
        comments TEXT NOT NULL DEFAULT '',
        created_at TIMESTAMP NOT NULL
    )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_reviews_created ON reviews(created_at)", [])?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies every migration newer than the recorded version, all or nothing.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!(Message::DbUpToDate(current_version as usize));
            return Ok(());
        }

        let tx = conn.transaction()?;
        for migration in pending {
            tracing::info!(version = migration.version, name = migration.name, "applying migration");
            if let Err(e) = (migration.up)(&tx) {
                tracing::error!(version = migration.version, error = %e, "migration failed");
                return Err(e);
            }
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
            msg_debug!(Message::DbMigrated(migration.version as usize));
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0))?;
        Ok(version.unwrap_or(0))
    }

    /// Applied migrations as (version, name, applied_at), oldest first.
    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    pub fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    MigrationManager::new().run_migrations(conn)
}

pub fn get_db_version(conn: &Connection) -> Result<u32> {
    MigrationManager::new().get_current_version(conn)
}
