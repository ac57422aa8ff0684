//! Report façade.
//!
//! [`Reports`] is the single entry point a presentation layer talks to. Every
//! operation follows the same steps:
//!
//! 1. resolve the user's email (explicit argument, development identity, or
//!    the signed-in identity from configuration),
//! 2. resolve the date range when the report is filter driven,
//! 3. make one blocking call to the row source,
//! 4. shape the rows (hierarchy, distribution, duration formatting),
//! 5. wrap the outcome in an [`Outcome`].
//!
//! Nothing is cached between calls and nothing escapes as a panic or a raw
//! source error: failures of the row source become `UpstreamUnavailable`.
//!
//! ## Wire shape
//!
//! ```json
//! { "ok": true, "data": [ ... ] }
//! { "ok": false, "errorKind": "InvalidFilter", "message": "Invalid filter option: 'Someday'" }
//! ```

use crate::libs::config::{Config, Environment, ReportConfig};
use crate::libs::distribution::board_distribution;
use crate::libs::error::{ErrorKind, ReportError, ReportResult};
use crate::libs::formatter::format_hours;
use crate::libs::hierarchy::build_hierarchy;
use crate::libs::models::{
    round_hours, BoardDistributionEntry, HierarchyNode, MonthlySummary, MvpEntry, MvpScope, Review, TotalHours, User,
    WeekendEntry, WeeklySeriesPoint, WeeklySummary,
};
use crate::libs::period::{resolve_range, Clock, DateRange, Filter, WeekOption};
use crate::libs::source::{ReviewStore, RowSource};
use chrono::NaiveDateTime;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Tagged result of a report operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    Failure { kind: ErrorKind, message: String },
}

impl<T> Outcome<T> {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Outcome::Success(data) => Some(data),
            Outcome::Failure { .. } => None,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Success(_) => None,
            Outcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

impl<T> From<ReportResult<T>> for Outcome<T> {
    fn from(result: ReportResult<T>) -> Self {
        match result {
            Ok(data) => Outcome::Success(data),
            Err(error) => Outcome::Failure {
                kind: error.kind(),
                message: error.to_string(),
            },
        }
    }
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Outcome::Success(data) => {
                let mut state = serializer.serialize_struct("Outcome", 2)?;
                state.serialize_field("ok", &true)?;
                state.serialize_field("data", data)?;
                state.end()
            }
            Outcome::Failure { kind, message } => {
                let mut state = serializer.serialize_struct("Outcome", 3)?;
                state.serialize_field("ok", &false)?;
                state.serialize_field("errorKind", kind)?;
                state.serialize_field("message", message)?;
                state.end()
            }
        }
    }
}

/// How the current user is determined when a request names nobody.
#[derive(Debug, Clone, Default)]
pub struct IdentityPolicy {
    pub environment: Environment,
    /// Identity used in the development environment.
    pub dev_email: Option<String>,
    /// The signed-in user's verified email.
    pub email: Option<String>,
}

impl IdentityPolicy {
    pub fn from_config(config: &Config) -> Self {
        let identity = config.identity.clone().unwrap_or_default();
        IdentityPolicy {
            environment: config.environment,
            dev_email: identity.dev_email,
            email: identity.email,
        }
    }

    /// Picks the explicit email, then the development identity, then the signed-in one.
    pub fn resolve(&self, explicit: Option<&str>) -> ReportResult<String> {
        let non_empty = |value: Option<&str>| value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);

        if let Some(email) = non_empty(explicit) {
            return Ok(email);
        }
        if self.environment == Environment::Development {
            if let Some(email) = non_empty(self.dev_email.as_deref()) {
                return Ok(email);
            }
        }
        non_empty(self.email.as_deref()).ok_or(ReportError::MissingIdentity)
    }
}

/// The report façade over a row source.
pub struct Reports<S> {
    source: S,
    clock: Arc<dyn Clock>,
    identity: IdentityPolicy,
    settings: ReportConfig,
}

impl<S: RowSource + ReviewStore> Reports<S> {
    pub fn new(source: S, clock: Arc<dyn Clock>, identity: IdentityPolicy, settings: ReportConfig) -> Self {
        Reports {
            source,
            clock,
            identity,
            settings,
        }
    }

    pub fn from_config(source: S, clock: Arc<dyn Clock>, config: &Config) -> Self {
        Self::new(source, clock, IdentityPolicy::from_config(config), config.report.clone().unwrap_or_default())
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn identity(&self) -> &IdentityPolicy {
        &self.identity
    }

    fn respond<T>(&self, report: &str, result: ReportResult<T>) -> Outcome<T> {
        if let Err(error) = &result {
            match error.kind() {
                ErrorKind::UpstreamUnavailable | ErrorKind::DataCorruption => {
                    tracing::error!(report, kind = %error.kind(), "{}", error)
                }
                _ => tracing::warn!(report, kind = %error.kind(), "{}", error),
            }
        }
        result.into()
    }

    fn user_email(&self, explicit: Option<&str>) -> ReportResult<String> {
        self.identity.resolve(explicit)
    }

    /// Board → group → item hierarchy for a filter token.
    pub fn entries(&self, filter: &str, user_email: Option<&str>) -> Outcome<Vec<HierarchyNode>> {
        self.respond("entries", self.try_entries(filter, user_email))
    }

    fn try_entries(&self, filter: &str, user_email: Option<&str>) -> ReportResult<Vec<HierarchyNode>> {
        let email = self.user_email(user_email)?;
        let range = resolve_range(filter, self.clock.as_ref())?;
        tracing::info!(filter, user = %email, range = %range, "fetching entries");

        let entries = self.source.fetch_entries(range.start, range.end, &email)?;
        tracing::debug!(count = entries.len(), "entries received");

        let boards = build_hierarchy(&entries, self.settings.on_category_conflict)?;
        tracing::info!(boards = boards.len(), "entries shaped");
        Ok(boards)
    }

    /// Percentage share per board for a filter token.
    pub fn board_distribution(&self, filter: &str, user_email: Option<&str>) -> Outcome<Vec<BoardDistributionEntry>> {
        let result = self.try_entries(filter, user_email).and_then(|boards| board_distribution(&boards));
        self.respond("board_distribution", result)
    }

    /// Monday..Friday hours for the current or previous week.
    pub fn weekly_summary(&self, week_option: &str, user_email: Option<&str>) -> Outcome<WeeklySummary> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            let week: WeekOption = week_option.parse()?;
            tracing::info!(week = %week, user = %email, "fetching weekly summary");

            let row = self
                .source
                .fetch_weekly_summary(week, &email)?
                .ok_or_else(|| ReportError::NotFound(format!("No weekly summary found for {}", email)))?;

            Ok(WeeklySummary {
                user_name: row.user_name,
                monday: format_hours(row.monday),
                tuesday: format_hours(row.tuesday),
                wednesday: format_hours(row.wednesday),
                thursday: format_hours(row.thursday),
                friday: format_hours(row.friday),
            })
        })();
        self.respond("weekly_summary", result)
    }

    /// User hours against the team average, month by month.
    pub fn monthly_comparison(&self, user_email: Option<&str>) -> Outcome<Vec<MonthlySummary>> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            tracing::info!(user = %email, "fetching monthly comparison");

            let rows = self.source.fetch_monthly_comparison(&email)?;
            Ok(rows
                .into_iter()
                .map(|row| MonthlySummary {
                    month_name: row.month_name,
                    team_average: format_hours(row.team_average),
                    user_hours: format_hours(row.user_hours),
                })
                .collect())
        })();
        self.respond("monthly_comparison", result)
    }

    /// Users of the configured teams. The requesting user must exist.
    pub fn users(&self, user_email: Option<&str>) -> Outcome<Vec<User>> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            if self.source.fetch_user_by_email(&email)?.is_none() {
                return Err(ReportError::NotFound(format!("User not found: {}", email)));
            }

            let teams: BTreeSet<String> = self.settings.teams.iter().cloned().collect();
            let users = self.source.fetch_users_by_team(&teams)?;
            tracing::info!(count = users.len(), teams = ?teams, "users listed");
            Ok(users)
        })();
        self.respond("users", result)
    }

    /// Directory entry for one email.
    pub fn user_info(&self, email: &str) -> Outcome<User> {
        let result = (|| {
            let email = email.trim();
            if email.is_empty() {
                return Err(ReportError::NotFound("User not found: no email given".to_string()));
            }
            self.source
                .fetch_user_by_email(email)?
                .ok_or_else(|| ReportError::NotFound(format!("User not found: {}", email)))
        })();
        self.respond("user_info", result)
    }

    /// Recent weekend work of the user.
    pub fn weekend_hours(&self, user_email: Option<&str>) -> Outcome<Vec<WeekendEntry>> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            let rows = self.source.fetch_weekend_entries(&email)?;
            Ok(rows
                .into_iter()
                .map(|row| WeekendEntry {
                    date: row.date.date(),
                    board_name: row.board_name,
                    group_name: row.group_name,
                    item_name: row.item_name,
                    duration_hours: round_hours(row.duration_hours),
                    formatted_duration: format_hours(row.duration_hours),
                })
                .collect())
        })();
        self.respond("weekend_hours", result)
    }

    /// Weekly chart series: user hours, team average and the weekly ideal.
    pub fn weekly_series(&self, user_email: Option<&str>) -> Outcome<Vec<WeeklySeriesPoint>> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            let rows = self.source.fetch_weekly_series(&email)?;
            Ok(rows
                .into_iter()
                .map(|row| WeeklySeriesPoint {
                    week_number: row.week_number,
                    user_hours: round_hours(row.user_hours),
                    avg_team_hours: round_hours(row.avg_team_hours),
                    weekly_ideal: round_hours(row.weekly_ideal),
                })
                .collect())
        })();
        self.respond("weekly_series", result)
    }

    /// Top performer list for the given scope.
    pub fn top_utilized(&self, scope: MvpScope) -> Outcome<Vec<MvpEntry>> {
        let result = (|| {
            tracing::info!(scope = %scope, "fetching top performers");
            let rows = self.source.fetch_top_utilized(scope)?;
            Ok(rows
                .into_iter()
                .map(|row| MvpEntry {
                    title: row.title,
                    user_name: row.user_name,
                    total_hours: round_hours(row.total_hours),
                    formatted_hours: format_hours(row.total_hours),
                })
                .collect())
        })();
        self.respond("top_utilized", result)
    }

    /// Moment of the last data sync.
    pub fn latest_update(&self) -> Outcome<NaiveDateTime> {
        let result = (|| {
            self.source
                .fetch_latest_update()?
                .ok_or_else(|| ReportError::NotFound("No update time found".to_string()))
        })();
        self.respond("latest_update", result)
    }

    /// Hours logged by everyone today.
    pub fn total_hours_today(&self) -> Outcome<TotalHours> {
        let result = (|| {
            let range: DateRange = Filter::Today.range(self.clock.today());
            let hours = self.source.fetch_total_hours(range)?;
            Ok(TotalHours {
                hours: round_hours(hours),
                formatted: format_hours(hours),
            })
        })();
        self.respond("total_hours_today", result)
    }

    /// Stores a 1..=5 star rating from the user.
    pub fn add_review(&self, user_email: Option<&str>, stars: u8, comments: &str) -> Outcome<()> {
        let result = (|| {
            let email = self.user_email(user_email)?;
            if !(1..=5).contains(&stars) {
                return Err(ReportError::InvalidInput(format!("Rating must be between 1 and 5 stars, got {}", stars)));
            }
            self.source.add_review(&email, stars, comments.trim())?;
            tracing::info!(user = %email, stars, "review added");
            Ok(())
        })();
        self.respond("add_review", result)
    }

    /// Mean rating, `None` before the first review.
    pub fn average_rating(&self) -> Outcome<Option<f64>> {
        let result = (|| Ok(self.source.average_rating()?.map(round_hours)))();
        self.respond("average_rating", result)
    }

    pub fn reviews(&self) -> Outcome<Vec<Review>> {
        let result = (|| Ok(self.source.fetch_reviews()?))();
        self.respond("reviews", result)
    }
}
