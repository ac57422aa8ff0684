//! SQLite row source.
//!
//! [`Store`] answers every [`RowSource`] and [`ReviewStore`] call with plain
//! SQL over the `users`, `entries`, `sync_log` and `reviews` tables. Windowed
//! reports (weekend, weekly series, monthly comparison, top performers) are
//! computed relative to the injected [`Clock`] using the sizes in
//! [`ReportConfig`].
//!
//! Team averages divide the hours of a team by the number of its members,
//! members without entries included. A user without a team is compared
//! against everybody in the directory.

use super::db::Db;
use crate::libs::config::ReportConfig;
use crate::libs::error::SourceResult;
use crate::libs::models::{MonthlyHoursRow, MvpRow, MvpScope, Review, TimeEntry, User, WeekendRow, WeeklyHoursRow, WeeklySeriesRow};
use crate::libs::period::{month_range, previous_month, week_start, Clock, DateRange, WeekOption};
use crate::libs::source::{ReviewStore, RowSource};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

const SELECT_ENTRIES: &str = "SELECT board_name, group_name, item_name, category_name, start_time, duration_hours
    FROM entries
    WHERE user_email = ?1 AND DATE(start_time) BETWEEN ?2 AND ?3
    ORDER BY start_time, id";
const SELECT_DAILY_HOURS: &str = "SELECT DATE(start_time), SUM(duration_hours)
    FROM entries
    WHERE user_email = ?1 AND DATE(start_time) BETWEEN ?2 AND ?3
    GROUP BY DATE(start_time)";
const SELECT_HOURS_BY_USER: &str = "SELECT LOWER(user_email), SUM(duration_hours)
    FROM entries
    WHERE DATE(start_time) BETWEEN ?1 AND ?2
    GROUP BY LOWER(user_email)";
const SELECT_WEEKEND: &str = "SELECT start_time, board_name, group_name, item_name, duration_hours
    FROM entries
    WHERE user_email = ?1 AND DATE(start_time) BETWEEN ?2 AND ?3 AND strftime('%w', start_time) IN ('0', '6')
    ORDER BY start_time DESC, id DESC";
const SELECT_LEADERS: &str = "SELECT COALESCE(u.user_name, e.user_email), SUM(e.duration_hours) AS total
    FROM entries e LEFT JOIN users u ON u.email = e.user_email";
const GROUP_LEADERS: &str = "GROUP BY LOWER(e.user_email) ORDER BY total DESC, 1 ASC";
const SELECT_USER: &str = "SELECT user_name, email, user_type, team FROM users";
const SELECT_TOTAL_HOURS: &str = "SELECT COALESCE(SUM(duration_hours), 0) FROM entries WHERE DATE(start_time) BETWEEN ?1 AND ?2";
const INSERT_REVIEW: &str = "INSERT INTO reviews (user_email, stars, comments, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_REVIEWS: &str = "SELECT user_email, stars, comments, created_at FROM reviews ORDER BY created_at DESC, id DESC";

/// Row source backed by the local SQLite database.
pub struct Store {
    pub(crate) db: Db,
    pub(crate) clock: Arc<dyn Clock>,
    settings: ReportConfig,
}

impl Store {
    pub fn new(db: Db, clock: Arc<dyn Clock>, settings: ReportConfig) -> Self {
        Store { db, clock, settings }
    }

    pub fn conn(&self) -> &Connection {
        &self.db.conn
    }

    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            user_name: row.get(0)?,
            email: row.get(1)?,
            user_type: row.get(2)?,
            team: row.get(3)?,
        })
    }

    /// Lowercased emails the user is averaged against.
    fn team_emails(&self, user_email: &str) -> SourceResult<Vec<String>> {
        let team: Option<String> = self
            .db
            .conn
            .query_row("SELECT team FROM users WHERE email = ?1", params![user_email], |row| row.get(0))
            .optional()?
            .flatten();

        let emails = match team {
            Some(team) => {
                let mut stmt = self.db.conn.prepare("SELECT LOWER(email) FROM users WHERE team = ?1")?;
                let rows = stmt.query_map(params![team], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()?
            }
            None => {
                let mut stmt = self.db.conn.prepare("SELECT LOWER(email) FROM users")?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()?
            }
        };

        if emails.is_empty() {
            return Ok(vec![user_email.to_lowercase()]);
        }
        Ok(emails)
    }

    fn hours_by_user(&self, range: DateRange) -> SourceResult<HashMap<String, f64>> {
        let mut stmt = self.db.conn.prepare(SELECT_HOURS_BY_USER)?;
        let rows = stmt.query_map(params![range.start, range.end], |row| Ok((row.get(0)?, row.get(1)?)))?;
        Ok(rows.collect::<Result<HashMap<String, f64>, _>>()?)
    }

    /// (user hours, team average) within `range`.
    fn user_and_team_hours(&self, user_email: &str, team: &[String], range: DateRange) -> SourceResult<(f64, f64)> {
        let hours = self.hours_by_user(range)?;
        let user_hours = hours.get(&user_email.to_lowercase()).copied().unwrap_or(0.0);
        let team_total: f64 = team.iter().map(|email| hours.get(email).copied().unwrap_or(0.0)).sum();
        Ok((user_hours, team_total / team.len().max(1) as f64))
    }

    /// Users ranked by hours, optionally restricted to `range`.
    fn leaders(&self, range: Option<DateRange>, limit: u32) -> SourceResult<Vec<(String, f64)>> {
        let rows = match range {
            Some(range) => {
                let sql = format!(
                    "{} WHERE DATE(e.start_time) BETWEEN ?1 AND ?2 {} LIMIT ?3",
                    SELECT_LEADERS, GROUP_LEADERS
                );
                let mut stmt = self.db.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![range.start, range.end, limit], |row| Ok((row.get(0)?, row.get(1)?)))?;
                rows.collect::<Result<Vec<(String, f64)>, _>>()?
            }
            None => {
                let sql = format!("{} {} LIMIT ?1", SELECT_LEADERS, GROUP_LEADERS);
                let mut stmt = self.db.conn.prepare(&sql)?;
                let rows = stmt.query_map(params![limit], |row| Ok((row.get(0)?, row.get(1)?)))?;
                rows.collect::<Result<Vec<(String, f64)>, _>>()?
            }
        };
        Ok(rows)
    }
}

impl RowSource for Store {
    fn fetch_entries(&self, start: NaiveDate, end: NaiveDate, user_email: &str) -> SourceResult<Vec<TimeEntry>> {
        let mut stmt = self.db.conn.prepare(SELECT_ENTRIES)?;
        let entries = stmt.query_map(params![user_email, start, end], |row| {
            Ok(TimeEntry {
                board_name: row.get(0)?,
                group_name: row.get(1)?,
                item_name: row.get(2)?,
                category_name: row.get(3)?,
                start_time: row.get(4)?,
                duration_hours: row.get(5)?,
            })
        })?;

        Ok(entries.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_weekly_summary(&self, week: WeekOption, user_email: &str) -> SourceResult<Option<WeeklyHoursRow>> {
        let user_name: Option<String> = self
            .db
            .conn
            .query_row("SELECT user_name FROM users WHERE email = ?1", params![user_email], |row| row.get(0))
            .optional()?;
        let Some(user_name) = user_name else {
            return Ok(None);
        };

        let range = week.range(self.today());
        let mut stmt = self.db.conn.prepare(SELECT_DAILY_HOURS)?;
        let days = stmt
            .query_map(params![user_email, range.start, range.end], |row| {
                Ok((row.get::<_, NaiveDate>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut summary = WeeklyHoursRow {
            user_name,
            monday: 0.0,
            tuesday: 0.0,
            wednesday: 0.0,
            thursday: 0.0,
            friday: 0.0,
        };
        for (date, hours) in days {
            match date.weekday() {
                Weekday::Mon => summary.monday += hours,
                Weekday::Tue => summary.tuesday += hours,
                Weekday::Wed => summary.wednesday += hours,
                Weekday::Thu => summary.thursday += hours,
                Weekday::Fri => summary.friday += hours,
                Weekday::Sat | Weekday::Sun => {}
            }
        }

        Ok(Some(summary))
    }

    fn fetch_monthly_comparison(&self, user_email: &str) -> SourceResult<Vec<MonthlyHoursRow>> {
        let today = self.today();
        let team = self.team_emails(user_email)?;

        let mut months = Vec::new();
        let mut month = month_range(today.year(), today.month());
        while let Some(range) = month {
            if months.len() as u32 >= self.settings.comparison_months {
                break;
            }
            months.push(range);
            month = previous_month(range.start);
        }
        months.reverse();

        months
            .into_iter()
            .map(|range| -> SourceResult<MonthlyHoursRow> {
                let (user_hours, team_average) = self.user_and_team_hours(user_email, &team, range)?;
                Ok(MonthlyHoursRow {
                    month_name: range.start.format("%B %Y").to_string(),
                    team_average,
                    user_hours,
                })
            })
            .collect()
    }

    fn fetch_users_by_team(&self, teams: &BTreeSet<String>) -> SourceResult<Vec<User>> {
        if teams.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; teams.len()].join(", ");
        let sql = format!("{} WHERE team IN ({}) ORDER BY user_name, email", SELECT_USER, placeholders);
        let mut stmt = self.db.conn.prepare(&sql)?;
        let users = stmt.query_map(params_from_iter(teams.iter()), Self::user_from_row)?;

        Ok(users.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_user_by_email(&self, email: &str) -> SourceResult<Option<User>> {
        let sql = format!("{} WHERE email = ?1", SELECT_USER);
        Ok(self.db.conn.query_row(&sql, params![email], Self::user_from_row).optional()?)
    }

    fn fetch_weekend_entries(&self, user_email: &str) -> SourceResult<Vec<WeekendRow>> {
        let today = self.today();
        let since = week_start(today) - Duration::days(7 * self.settings.weekend_weeks as i64);

        let mut stmt = self.db.conn.prepare(SELECT_WEEKEND)?;
        let rows = stmt.query_map(params![user_email, since, today], |row| {
            Ok(WeekendRow {
                date: row.get(0)?,
                board_name: row.get(1)?,
                group_name: row.get(2)?,
                item_name: row.get(3)?,
                duration_hours: row.get(4)?,
            })
        })?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn fetch_weekly_series(&self, user_email: &str) -> SourceResult<Vec<WeeklySeriesRow>> {
        let current = week_start(self.today());
        let team = self.team_emails(user_email)?;

        (0..self.settings.series_weeks as i64)
            .rev()
            .map(|weeks_back| -> SourceResult<WeeklySeriesRow> {
                let monday = current - Duration::days(7 * weeks_back);
                let range = DateRange::new(monday, monday + Duration::days(6));
                let (user_hours, avg_team_hours) = self.user_and_team_hours(user_email, &team, range)?;
                Ok(WeeklySeriesRow {
                    week_number: monday.iso_week().week(),
                    user_hours,
                    avg_team_hours,
                    weekly_ideal: self.settings.weekly_ideal_hours,
                })
            })
            .collect()
    }

    fn fetch_top_utilized(&self, scope: MvpScope) -> SourceResult<Vec<MvpRow>> {
        let today = self.today();
        let limit = self.settings.top_limit;

        let to_rows = |leaders: Vec<(String, f64)>, title: Option<&str>| {
            leaders
                .into_iter()
                .map(|(user_name, total_hours)| MvpRow {
                    title: title.map(str::to_string),
                    user_name,
                    total_hours,
                })
                .collect::<Vec<_>>()
        };

        match scope {
            MvpScope::Overall => Ok(to_rows(self.leaders(None, limit)?, None)),
            MvpScope::LastMonth => match previous_month(today) {
                Some(range) => Ok(to_rows(self.leaders(Some(range), limit)?, None)),
                None => Ok(Vec::new()),
            },
            MvpScope::TopPerformances => {
                let monday = week_start(today);
                let mut periods = vec![("Top Performer of the Week", Some(DateRange::new(monday, monday + Duration::days(6))))];
                periods.push(("Top Performer of the Month", month_range(today.year(), today.month())));
                periods.push((
                    "Top Performer of the Year",
                    NaiveDate::from_ymd_opt(today.year(), 1, 1)
                        .zip(NaiveDate::from_ymd_opt(today.year(), 12, 31))
                        .map(|(start, end)| DateRange::new(start, end)),
                ));

                let mut rows = Vec::new();
                for (title, range) in periods {
                    if let Some(range) = range {
                        rows.extend(to_rows(self.leaders(Some(range), 1)?, Some(title)));
                    }
                }
                Ok(rows)
            }
        }
    }

    fn fetch_latest_update(&self) -> SourceResult<Option<NaiveDateTime>> {
        let latest: Option<NaiveDateTime> = self
            .db
            .conn
            .query_row("SELECT MAX(synced_at) FROM sync_log", [], |row| row.get(0))?;
        Ok(latest)
    }

    fn fetch_total_hours(&self, range: DateRange) -> SourceResult<f64> {
        let total: f64 = self
            .db
            .conn
            .query_row(SELECT_TOTAL_HOURS, params![range.start, range.end], |row| row.get(0))?;
        Ok(total)
    }
}

impl ReviewStore for Store {
    fn add_review(&self, user_email: &str, stars: u8, comments: &str) -> SourceResult<()> {
        self.db
            .conn
            .execute(INSERT_REVIEW, params![user_email, stars, comments, self.clock.now()])?;
        Ok(())
    }

    fn average_rating(&self) -> SourceResult<Option<f64>> {
        let average: Option<f64> = self.db.conn.query_row("SELECT AVG(stars) FROM reviews", [], |row| row.get(0))?;
        Ok(average)
    }

    fn fetch_reviews(&self) -> SourceResult<Vec<Review>> {
        let mut stmt = self.db.conn.prepare(SELECT_REVIEWS)?;
        let reviews = stmt.query_map([], |row| {
            Ok(Review {
                user_email: row.get(0)?,
                stars: row.get(1)?,
                comments: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        Ok(reviews.collect::<Result<Vec<_>, _>>()?)
    }
}
