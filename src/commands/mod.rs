pub mod dashboard;
pub mod entries;
pub mod import;
pub mod init;
#[cfg(debug_assertions)]
pub mod migrations;
pub mod monthly;
pub mod mvp;
pub mod review;
pub mod series;
pub mod status;
pub mod users;
pub mod weekend;
pub mod weekly;

use crate::db::{db::Db, store::Store};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::period::SystemClock;
use crate::libs::report::{Outcome, Reports};
use crate::msg_bail_anyhow;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Import a JSON snapshot of users and time entries", arg_required_else_help = true)]
    Import(import::ImportArgs),
    #[command(about = "Show logged entries as a board / group / item tree")]
    Entries(entries::EntriesArgs),
    #[command(about = "Show each board's share of the logged hours")]
    Distribution(entries::EntriesArgs),
    #[command(about = "Show Monday to Friday hours of a week")]
    Weekly(weekly::WeeklyArgs),
    #[command(about = "Compare monthly hours against the team average")]
    Monthly(ReportOpts),
    #[command(about = "Show recent weekend work")]
    Weekend(ReportOpts),
    #[command(about = "Show weekly hours against the team average and the ideal")]
    Series(ReportOpts),
    #[command(about = "Show top performers")]
    Mvp(mvp::MvpArgs),
    #[command(about = "List users of the configured teams")]
    Users(ReportOpts),
    #[command(about = "Show a user's directory entry", arg_required_else_help = true)]
    User(users::UserArgs),
    #[command(about = "Show identity, last sync and today's team hours")]
    Status(ReportOpts),
    #[command(about = "Rate the dashboard or read ratings")]
    Review(review::ReviewArgs),
    #[command(about = "Load every report at once")]
    Dashboard(ReportOpts),
    #[cfg(debug_assertions)]
    #[command(about = "Inspect database migrations")]
    Migrations(migrations::MigrationsArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Import(args) => import::cmd(args),
            Commands::Entries(args) => entries::cmd(args),
            Commands::Distribution(args) => entries::distribution(args),
            Commands::Weekly(args) => weekly::cmd(args),
            Commands::Monthly(opts) => monthly::cmd(opts),
            Commands::Weekend(opts) => weekend::cmd(opts),
            Commands::Series(opts) => series::cmd(opts),
            Commands::Mvp(args) => mvp::cmd(args),
            Commands::Users(opts) => users::cmd(opts),
            Commands::User(args) => users::user(args),
            Commands::Status(opts) => status::cmd(opts),
            Commands::Review(args) => review::cmd(args),
            Commands::Dashboard(opts) => dashboard::cmd(opts).await,
            #[cfg(debug_assertions)]
            Commands::Migrations(args) => migrations::cmd(args),
        }
    }
}

/// Options shared by the report commands.
#[derive(Debug, Clone, Args)]
pub struct ReportOpts {
    /// Email of the user to report on. Defaults to the configured identity
    #[arg(short, long)]
    pub user: Option<String>,

    /// Print the tagged JSON result instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Opens the configured store and wraps it in the report façade.
pub fn open_reports(config: &Config) -> Result<Reports<Store>> {
    let report = config.report.clone().unwrap_or_default();
    let db = Db::open_configured(config.store_path().as_deref())?;
    let store = Store::new(db, Arc::new(SystemClock), report);
    Ok(Reports::from_config(store, Arc::new(SystemClock), config))
}

/// Prints an outcome as JSON or hands the data to `show`.
///
/// Failures are printed as JSON in JSON mode and turned into an error otherwise.
pub fn render<T, F>(outcome: Outcome<T>, json: bool, show: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T) -> Result<()>,
{
    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Success(data) => show(&data),
        Outcome::Failure { kind, message } => msg_bail_anyhow!(Message::ReportFailed {
            kind: kind.to_string(),
            message,
        }),
    }
}
