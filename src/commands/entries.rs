use super::{open_reports, render, ReportOpts};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct EntriesArgs {
    /// Today, Yesterday, TwoWeeksAgo, ThisWeek, LastWeek or Month_<year>_<month>
    #[arg(default_value = "ThisWeek")]
    filter: String,

    #[command(flatten)]
    opts: ReportOpts,
}

pub fn cmd(args: EntriesArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    let outcome = reports.entries(&args.filter, args.opts.user.as_deref());

    render(outcome, args.opts.json, |boards| {
        if boards.is_empty() {
            msg_info!(Message::NoEntriesFound(args.filter.clone()));
            return Ok(());
        }
        View::hierarchy(boards)
    })
}

pub fn distribution(args: EntriesArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    let outcome = reports.board_distribution(&args.filter, args.opts.user.as_deref());

    render(outcome, args.opts.json, |entries| {
        if entries.is_empty() {
            msg_info!(Message::NoEntriesFound(args.filter.clone()));
            return Ok(());
        }
        View::distribution(entries)
    })
}
