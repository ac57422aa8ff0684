use super::{open_reports, render, ReportOpts};
use crate::libs::config::Config;
use crate::libs::period::WeekOption;
use crate::libs::view::View;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WeeklyArgs {
    /// Which week to summarize
    #[arg(value_enum, default_value_t = WeekOption::Current)]
    week: WeekOption,

    #[command(flatten)]
    opts: ReportOpts,
}

pub fn cmd(args: WeeklyArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    let outcome = reports.weekly_summary(&args.week.to_string(), args.opts.user.as_deref());

    render(outcome, args.opts.json, View::weekly)
}
