//! Every report for one user, loaded concurrently.
//!
//! Each section runs on the blocking pool with its own database connection,
//! so a slow or failing section never holds up the others.

use super::{open_reports, ReportOpts};
use crate::db::store::Store;
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::models::MvpScope;
use crate::libs::report::{IdentityPolicy, Outcome, Reports};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print};
use anyhow::Result;
use tokio::task::{self, JoinHandle};

fn section<T, F>(config: &Config, user: &str, run: F) -> JoinHandle<Result<Outcome<T>>>
where
    T: Send + 'static,
    F: FnOnce(&Reports<Store>, &str) -> Outcome<T> + Send + 'static,
{
    let config = config.clone();
    let user = user.to_string();
    task::spawn_blocking(move || {
        let reports = open_reports(&config)?;
        Ok(run(&reports, &user))
    })
}

fn show<T>(title: &str, outcome: &Outcome<T>, view: impl FnOnce(&T) -> Result<()>) -> Result<()> {
    msg_print!(Message::ReportHeader(title.to_string()), true);
    match outcome {
        Outcome::Success(data) => view(data),
        Outcome::Failure { kind, message } => {
            msg_error!(Message::DashboardSectionFailed(title.to_string()));
            msg_error!(Message::ReportFailed {
                kind: kind.to_string(),
                message: message.clone(),
            });
            Ok(())
        }
    }
}

pub async fn cmd(opts: ReportOpts) -> Result<()> {
    let config = Config::read()?;
    let user = IdentityPolicy::from_config(&config).resolve(opts.user.as_deref())?;

    // Migrate once before the sections open their own connections.
    drop(open_reports(&config)?);

    let (entries, distribution, weekly, monthly, weekend, series, top, today, latest) = tokio::join!(
        section(&config, &user, |r, u| r.entries("ThisWeek", Some(u))),
        section(&config, &user, |r, u| r.board_distribution("ThisWeek", Some(u))),
        section(&config, &user, |r, u| r.weekly_summary("current", Some(u))),
        section(&config, &user, |r, u| r.monthly_comparison(Some(u))),
        section(&config, &user, |r, u| r.weekend_hours(Some(u))),
        section(&config, &user, |r, u| r.weekly_series(Some(u))),
        section(&config, &user, |r, _| r.top_utilized(MvpScope::TopPerformances)),
        section(&config, &user, |r, _| r.total_hours_today()),
        section(&config, &user, |r, _| r.latest_update()),
    );
    let (entries, distribution, weekly, monthly) = (entries??, distribution??, weekly??, monthly??);
    let (weekend, series, top, today, latest) = (weekend??, series??, top??, today??, latest??);

    if opts.json {
        let dashboard = serde_json::json!({
            "user": user,
            "entries": entries,
            "distribution": distribution,
            "weeklySummary": weekly,
            "monthlyComparison": monthly,
            "weekendHours": weekend,
            "weeklySeries": series,
            "topPerformers": top,
            "totalHoursToday": today,
            "latestUpdate": latest,
        });
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    msg_print!(Message::DashboardHeader(user.clone()), true);
    if let Outcome::Success(at) = &latest {
        msg_info!(Message::LatestUpdate(at.format("%Y-%m-%d %H:%M").to_string()));
    }
    if let Outcome::Success(total) = &today {
        msg_info!(Message::TotalHoursToday(total.formatted.clone()));
    }

    show("This week", &entries, |boards| View::hierarchy(boards))?;
    show("Board distribution", &distribution, |shares| View::distribution(shares))?;
    show("Weekly summary", &weekly, View::weekly)?;
    show("Monthly comparison", &monthly, |months| View::monthly(months))?;
    show("Weekend work", &weekend, |rows| View::weekend(rows))?;
    show("Weekly series", &series, |points| View::series(points))?;
    show("Top performers", &top, |rows| View::mvp(rows))?;

    Ok(())
}
