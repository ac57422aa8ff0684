use super::{open_reports, render};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::models::MvpScope;
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MvpArgs {
    /// Which ranking to show
    #[arg(value_enum, default_value_t = MvpScope::Overall)]
    scope: MvpScope,

    /// Print the tagged JSON result instead of a table
    #[arg(long)]
    json: bool,
}

pub fn cmd(args: MvpArgs) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;

    render(reports.top_utilized(args.scope), args.json, |entries| {
        if entries.is_empty() {
            msg_info!(Message::NoDataFound);
            return Ok(());
        }
        View::mvp(entries)
    })
}
