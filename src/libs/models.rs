//! Report data model.
//!
//! Raw rows (`*Row`, [`TimeEntry`], [`User`]) are what a row source hands back.
//! View shapes ([`HierarchyNode`], [`WeeklySummary`], [`MonthlySummary`], ...)
//! are what the report façade returns; they are built fresh for every request
//! and serialize straight to JSON in camelCase.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single logged piece of work, as read from the row source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub board_name: String,
    pub group_name: String,
    pub item_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    pub start_time: NaiveDateTime,
    pub duration_hours: f64,
}

impl TimeEntry {
    pub fn new(board: &str, group: &str, item: &str, start_time: NaiveDateTime, duration_hours: f64) -> Self {
        TimeEntry {
            board_name: board.to_string(),
            group_name: group.to_string(),
            item_name: item.to_string(),
            category_name: None,
            start_time,
            duration_hours,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category_name = Some(category.to_string());
        self
    }
}

/// One node of the board → group → item tree.
///
/// Boards carry `category_name`, items carry `entry_date`; groups carry neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyNode {
    pub label: String,
    pub formatted_duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub children: Vec<HierarchyNode>,
}

/// A board's share of the total hours in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDistributionEntry {
    pub board_name: String,
    pub formatted_hours: String,
    pub percentage: f64,
}

/// Directory entry for a dashboard user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_name: String,
    pub email: String,
    pub user_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

/// Hours per weekday for one user and one week.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyHoursRow {
    pub user_name: String,
    pub monday: f64,
    pub tuesday: f64,
    pub wednesday: f64,
    pub thursday: f64,
    pub friday: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub user_name: String,
    pub monday: String,
    pub tuesday: String,
    pub wednesday: String,
    pub thursday: String,
    pub friday: String,
}

/// User hours against the team average for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyHoursRow {
    pub month_name: String,
    pub team_average: f64,
    pub user_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub month_name: String,
    pub team_average: String,
    pub user_hours: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekendRow {
    pub date: NaiveDateTime,
    pub board_name: String,
    pub group_name: String,
    pub item_name: String,
    pub duration_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekendEntry {
    pub date: NaiveDate,
    pub board_name: String,
    pub group_name: String,
    pub item_name: String,
    pub duration_hours: f64,
    pub formatted_duration: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeeklySeriesRow {
    pub week_number: u32,
    pub user_hours: f64,
    pub avg_team_hours: f64,
    pub weekly_ideal: f64,
}

/// One point of the weekly utilization chart. Values stay numeric for plotting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySeriesPoint {
    pub week_number: u32,
    pub user_hours: f64,
    pub avg_team_hours: f64,
    pub weekly_ideal: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MvpRow {
    pub title: Option<String>,
    pub user_name: String,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MvpEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub user_name: String,
    pub total_hours: f64,
    pub formatted_hours: String,
}

/// Which top-performer list to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MvpScope {
    /// Most hours logged across all recorded history.
    Overall,
    /// Most hours logged during the previous calendar month.
    LastMonth,
    /// Leader of the current week, month and year, one row each.
    TopPerformances,
}

impl fmt::Display for MvpScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MvpScope::Overall => "overall",
            MvpScope::LastMonth => "last-month",
            MvpScope::TopPerformances => "top-performances",
        };
        f.write_str(name)
    }
}

impl FromStr for MvpScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overall" => Ok(MvpScope::Overall),
            "last-month" | "lastmonth" => Ok(MvpScope::LastMonth),
            "top-performances" | "topperformances" | "top" => Ok(MvpScope::TopPerformances),
            other => Err(format!("unknown scope '{}'", other)),
        }
    }
}

/// Team-wide hours logged today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalHours {
    pub hours: f64,
    pub formatted: String,
}

/// A dashboard rating left by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub user_email: String,
    pub stars: u8,
    pub comments: String,
    pub created_at: NaiveDateTime,
}

/// Rounds a fractional hour value to two decimals, the precision rows are kept at.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}
