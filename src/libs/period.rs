//! Date ranges selected by filter tokens.
//!
//! Reports are requested with a named filter such as `ThisWeek` or
//! `Month_2024_02`. This module turns such a token into a concrete, inclusive
//! [`DateRange`]. The current moment always comes from an injected [`Clock`],
//! which keeps resolution deterministic under test.
//!
//! Weeks start on Monday. A Sunday belongs to the week that began six days
//! earlier.
//!
//! Unknown tokens are rejected with [`ReportError::InvalidFilter`]; there is no
//! fallback to "today".

use crate::libs::error::{ReportError, ReportResult};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Source of the current moment.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given moment.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Noon of the given date. Returns `None` for an invalid date.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(12, 0, 0))
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn single(date: NaiveDate) -> Self {
        DateRange { start: date, end: date }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days covered, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) to {} ({})",
            self.start.format("%Y-%m-%d"),
            self.start.format("%a"),
            self.end.format("%Y-%m-%d"),
            self.end.format("%a")
        )
    }
}

/// A recognised filter token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    Today,
    Yesterday,
    TwoWeeksAgo,
    ThisWeek,
    LastWeek,
    Month(Month),
}

/// A validated calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    year: i32,
    month: u32,
    range: DateRange,
}

impl Month {
    /// Returns `None` when `month` is outside 1..=12 or the year is out of range.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        month_range(year, month).map(|range| Month { year, month, range })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn range(&self) -> DateRange {
        self.range
    }
}

impl Filter {
    /// Concrete date range of this filter relative to `today`.
    pub fn range(&self, today: NaiveDate) -> DateRange {
        match *self {
            Filter::Today => DateRange::single(today),
            Filter::Yesterday => DateRange::single(today - Duration::days(1)),
            Filter::TwoWeeksAgo => DateRange::new(today - Duration::days(14), today),
            Filter::ThisWeek => DateRange::new(week_start(today), today),
            Filter::LastWeek => {
                let start = week_start(today) - Duration::days(7);
                DateRange::new(start, start + Duration::days(6))
            }
            Filter::Month(month) => month.range(),
        }
    }
}

impl FromStr for Filter {
    type Err = ReportError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::InvalidFilter(token.to_string());

        if let Some(rest) = token.strip_prefix("Month_") {
            let (year, month) = rest.split_once('_').ok_or_else(invalid)?;
            let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
            if !digits(year) || !digits(month) {
                return Err(invalid());
            }
            let year: i32 = year.parse().map_err(|_| invalid())?;
            let month: u32 = month.parse().map_err(|_| invalid())?;
            return Month::new(year, month).map(Filter::Month).ok_or_else(invalid);
        }

        match token {
            "Today" => Ok(Filter::Today),
            "Yesterday" => Ok(Filter::Yesterday),
            "TwoWeeksAgo" => Ok(Filter::TwoWeeksAgo),
            "ThisWeek" => Ok(Filter::ThisWeek),
            "LastWeek" => Ok(Filter::LastWeek),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Today => f.write_str("Today"),
            Filter::Yesterday => f.write_str("Yesterday"),
            Filter::TwoWeeksAgo => f.write_str("TwoWeeksAgo"),
            Filter::ThisWeek => f.write_str("ThisWeek"),
            Filter::LastWeek => f.write_str("LastWeek"),
            Filter::Month(month) => write!(f, "Month_{}_{:02}", month.year, month.month),
        }
    }
}

/// Resolves a filter token against the clock's current date.
pub fn resolve_range(token: &str, clock: &dyn Clock) -> ReportResult<DateRange> {
    let filter: Filter = token.parse()?;
    Ok(filter.range(clock.today()))
}

/// Full Monday..Sunday week selected for the weekly summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum WeekOption {
    Current,
    Previous,
}

impl WeekOption {
    pub fn range(&self, today: NaiveDate) -> DateRange {
        let monday = match self {
            WeekOption::Current => week_start(today),
            WeekOption::Previous => week_start(today) - Duration::days(7),
        };
        DateRange::new(monday, monday + Duration::days(6))
    }
}

impl FromStr for WeekOption {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "current" | "this" | "thisweek" => Ok(WeekOption::Current),
            "previous" | "last" | "lastweek" => Ok(WeekOption::Previous),
            _ => Err(ReportError::InvalidFilter(s.to_string())),
        }
    }
}

impl fmt::Display for WeekOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekOption::Current => f.write_str("current"),
            WeekOption::Previous => f.write_str("previous"),
        }
    }
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// First and last day of a calendar month, or `None` when the month is invalid.
pub fn month_range(year: i32, month: u32) -> Option<DateRange> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(DateRange::new(start, next - Duration::days(1)))
}

/// The calendar month before the one containing `date`.
pub fn previous_month(date: NaiveDate) -> Option<DateRange> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    month_range(year, month)
}
