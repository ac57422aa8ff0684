use super::open_reports;
use crate::db::snapshot::Snapshot;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::report::Outcome;
use crate::{msg_bail_anyhow, msg_info, msg_success};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// JSON file with `users` and `entries`
    path: PathBuf,

    /// Drop all existing entries before importing
    #[arg(long)]
    replace: bool,
}

pub fn cmd(args: ImportArgs) -> Result<()> {
    if !args.path.exists() {
        msg_bail_anyhow!(Message::ImportFileNotFound(args.path.display().to_string()));
    }

    let snapshot = Snapshot::from_path(&args.path)?;
    let config = Config::read()?;
    let mut reports = open_reports(&config)?;
    let summary = reports.source_mut().import(&snapshot, args.replace)?;

    msg_success!(Message::ImportCompleted {
        users: summary.users,
        entries: summary.entries,
    });
    if let Outcome::Success(at) = reports.latest_update() {
        msg_info!(Message::SyncRecorded(at.format("%Y-%m-%d %H:%M:%S").to_string()));
    }
    Ok(())
}
