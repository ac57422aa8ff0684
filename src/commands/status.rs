use super::{open_reports, ReportOpts};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::report::Outcome;
use crate::{msg_error, msg_info, msg_print};
use anyhow::Result;

pub fn cmd(opts: ReportOpts) -> Result<()> {
    let config = Config::read()?;
    let reports = open_reports(&config)?;

    let identity = reports.identity().resolve(opts.user.as_deref());
    let latest = reports.latest_update();
    let today = reports.total_hours_today();

    if opts.json {
        let identity: Outcome<String> = identity.into();
        let status = serde_json::json!({
            "environment": config.environment,
            "identity": identity,
            "latestUpdate": latest,
            "totalHoursToday": today,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    msg_print!(Message::ConfigEnvironment(config.environment.to_string()));
    match identity {
        Ok(email) => msg_print!(Message::IdentityResolved(email)),
        Err(e) => msg_error!(e),
    }
    match latest {
        Outcome::Success(at) => msg_info!(Message::LatestUpdate(at.format("%Y-%m-%d %H:%M").to_string())),
        Outcome::Failure { message, .. } => msg_info!(message),
    }
    match today {
        Outcome::Success(total) => msg_info!(Message::TotalHoursToday(total.formatted)),
        Outcome::Failure { kind, message } => msg_error!(Message::ReportFailed {
            kind: kind.to_string(),
            message,
        }),
    }

    Ok(())
}
