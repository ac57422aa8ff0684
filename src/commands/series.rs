use super::{open_reports, render, ReportOpts};
use crate::libs::config::Config;
use crate::libs::view::View;
use anyhow::Result;

pub fn cmd(opts: ReportOpts) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;
    render(reports.weekly_series(opts.user.as_deref()), opts.json, |points| View::series(points))
}
