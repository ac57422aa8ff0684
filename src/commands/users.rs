use super::{open_reports, render, ReportOpts};
use crate::libs::config::Config;
use crate::libs::view::View;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct UserArgs {
    /// Email to look up
    email: String,

    /// Print the tagged JSON result instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(opts: ReportOpts) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    render(reports.users(opts.user.as_deref()), opts.json, |users| View::users(users))
}

pub fn user(args: UserArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    render(reports.user_info(&args.email), args.json, |user| View::users(std::slice::from_ref(user)))
}
