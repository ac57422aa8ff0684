use crate::db::{
    db::Db,
    migrations::{get_db_version, MigrationManager},
};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::{msg_info, msg_print};
use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct MigrationsArgs {
    #[command(subcommand)]
    command: MigrationsCommand,
}

#[derive(Debug, Subcommand)]
enum MigrationsCommand {
    /// Show current database version
    Status,
    /// Show migration history
    History,
}

pub fn cmd(args: MigrationsArgs) -> Result<()> {
    let config = Config::read()?;
    let db = Db::open_configured(config.store_path().as_deref())?;

    match args.command {
        MigrationsCommand::Status => {
            let version = get_db_version(&db.conn)?;
            msg_info!(Message::DbUpToDate(version as usize));
        }
        MigrationsCommand::History => {
            let history = MigrationManager::new().get_migration_history(&db.conn)?;
            for (version, name, applied_at) in history {
                msg_print!(format!("  v{}: {} (applied: {})", version, name, applied_at));
            }
        }
    }

    Ok(())
}
