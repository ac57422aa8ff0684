use super::{open_reports, render, ReportOpts};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_info;
use anyhow::Result;

pub fn cmd(opts: ReportOpts) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;

    render(reports.weekend_hours(opts.user.as_deref()), opts.json, |entries| {
        if entries.is_empty() {
            msg_info!(Message::NoDataFound);
            return Ok(());
        }
        View::weekend(entries)
    })
}
