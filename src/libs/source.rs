//! Row source boundary.
//!
//! The report façade never talks to a database directly. It asks a
//! [`RowSource`] for rows and a [`ReviewStore`] for feedback, and shapes what
//! comes back. [`crate::db::store::Store`] is the SQLite implementation;
//! [`MemorySource`] keeps canned rows in memory for tests and embedding.
//!
//! Every call is a single blocking fetch. Implementations do not retry.

use crate::libs::error::{SourceError, SourceResult};
use crate::libs::models::{MonthlyHoursRow, MvpRow, MvpScope, Review, TimeEntry, User, WeekendRow, WeeklyHoursRow, WeeklySeriesRow};
use crate::libs::period::{DateRange, WeekOption};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

/// Read side of the reporting store.
pub trait RowSource {
    /// Entries of `user_email` whose start date falls within `start..=end`, in start order.
    fn fetch_entries(&self, start: NaiveDate, end: NaiveDate, user_email: &str) -> SourceResult<Vec<TimeEntry>>;

    /// Monday..Friday hours of the selected week, `None` when the user is unknown.
    fn fetch_weekly_summary(&self, week: WeekOption, user_email: &str) -> SourceResult<Option<WeeklyHoursRow>>;

    /// User hours and team average for each recent month, oldest first.
    fn fetch_monthly_comparison(&self, user_email: &str) -> SourceResult<Vec<MonthlyHoursRow>>;

    /// Users belonging to any of `teams`, ordered by name.
    fn fetch_users_by_team(&self, teams: &BTreeSet<String>) -> SourceResult<Vec<User>>;

    fn fetch_user_by_email(&self, email: &str) -> SourceResult<Option<User>>;

    /// Recent entries logged on Saturdays and Sundays, newest first.
    fn fetch_weekend_entries(&self, user_email: &str) -> SourceResult<Vec<WeekendRow>>;

    /// Weekly user hours against the team average, oldest week first.
    fn fetch_weekly_series(&self, user_email: &str) -> SourceResult<Vec<WeeklySeriesRow>>;

    fn fetch_top_utilized(&self, scope: MvpScope) -> SourceResult<Vec<MvpRow>>;

    /// Moment of the most recent data sync.
    fn fetch_latest_update(&self) -> SourceResult<Option<NaiveDateTime>>;

    /// Hours logged by everyone within `range`.
    fn fetch_total_hours(&self, range: DateRange) -> SourceResult<f64>;
}

/// Append-only feedback storage.
pub trait ReviewStore {
    fn add_review(&self, user_email: &str, stars: u8, comments: &str) -> SourceResult<()>;

    /// Mean of all stars, `None` when nobody has rated yet.
    fn average_rating(&self) -> SourceResult<Option<f64>>;

    /// All reviews, newest first.
    fn fetch_reviews(&self) -> SourceResult<Vec<Review>>;
}

/// In-memory row source with canned results.
///
/// Entries are filtered by date and user like the real store; every other
/// report returns whatever was registered for it. Flip [`MemorySource::set_unavailable`]
/// to simulate an outage.
#[derive(Clone, Default)]
pub struct MemorySource {
    data: Arc<RwLock<MemoryData>>,
}

#[derive(Default)]
struct MemoryData {
    entries: Vec<(String, TimeEntry)>,
    users: Vec<User>,
    weekly: HashMap<(WeekOption, String), WeeklyHoursRow>,
    monthly: HashMap<String, Vec<MonthlyHoursRow>>,
    weekend: HashMap<String, Vec<WeekendRow>>,
    series: HashMap<String, Vec<WeeklySeriesRow>>,
    top: HashMap<MvpScope, Vec<MvpRow>>,
    latest_update: Option<NaiveDateTime>,
    reviews: Vec<Review>,
    review_clock: Option<NaiveDateTime>,
    unavailable: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> SourceResult<std::sync::RwLockReadGuard<'_, MemoryData>> {
        let data = self
            .data
            .read()
            .map_err(|_| SourceError::Unavailable("memory source lock poisoned".to_string()))?;
        if data.unavailable {
            return Err(SourceError::Unavailable("memory source switched off".to_string()));
        }
        Ok(data)
    }

    fn write(&self) -> SourceResult<std::sync::RwLockWriteGuard<'_, MemoryData>> {
        self.data
            .write()
            .map_err(|_| SourceError::Unavailable("memory source lock poisoned".to_string()))
    }

    fn update(&self, apply: impl FnOnce(&mut MemoryData)) {
        if let Ok(mut data) = self.data.write() {
            apply(&mut data);
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.update(|data| data.unavailable = unavailable);
    }

    pub fn add_entry(&self, user_email: &str, entry: TimeEntry) {
        self.update(|data| data.entries.push((user_email.to_string(), entry)));
    }

    pub fn add_user(&self, user: User) {
        self.update(|data| data.users.push(user));
    }

    pub fn set_weekly_summary(&self, week: WeekOption, user_email: &str, row: WeeklyHoursRow) {
        self.update(|data| {
            data.weekly.insert((week, user_email.to_string()), row);
        });
    }

    pub fn set_monthly_comparison(&self, user_email: &str, rows: Vec<MonthlyHoursRow>) {
        self.update(|data| {
            data.monthly.insert(user_email.to_string(), rows);
        });
    }

    pub fn set_weekend_entries(&self, user_email: &str, rows: Vec<WeekendRow>) {
        self.update(|data| {
            data.weekend.insert(user_email.to_string(), rows);
        });
    }

    pub fn set_weekly_series(&self, user_email: &str, rows: Vec<WeeklySeriesRow>) {
        self.update(|data| {
            data.series.insert(user_email.to_string(), rows);
        });
    }

    pub fn set_top_utilized(&self, scope: MvpScope, rows: Vec<MvpRow>) {
        self.update(|data| {
            data.top.insert(scope, rows);
        });
    }

    pub fn set_latest_update(&self, moment: NaiveDateTime) {
        self.update(|data| data.latest_update = Some(moment));
    }

    /// Timestamp stamped on reviews added afterwards.
    pub fn set_review_clock(&self, moment: NaiveDateTime) {
        self.update(|data| data.review_clock = Some(moment));
    }
}

impl RowSource for MemorySource {
    fn fetch_entries(&self, start: NaiveDate, end: NaiveDate, user_email: &str) -> SourceResult<Vec<TimeEntry>> {
        let data = self.read()?;
        let range = DateRange::new(start, end);
        let mut entries: Vec<TimeEntry> = data
            .entries
            .iter()
            .filter(|(email, entry)| email == user_email && range.contains(entry.start_time.date()))
            .map(|(_, entry)| entry.clone())
            .collect();
        entries.sort_by_key(|entry| entry.start_time);
        Ok(entries)
    }

    fn fetch_weekly_summary(&self, week: WeekOption, user_email: &str) -> SourceResult<Option<WeeklyHoursRow>> {
        Ok(self.read()?.weekly.get(&(week, user_email.to_string())).cloned())
    }

    fn fetch_monthly_comparison(&self, user_email: &str) -> SourceResult<Vec<MonthlyHoursRow>> {
        Ok(self.read()?.monthly.get(user_email).cloned().unwrap_or_default())
    }

    fn fetch_users_by_team(&self, teams: &BTreeSet<String>) -> SourceResult<Vec<User>> {
        let data = self.read()?;
        let mut users: Vec<User> = data
            .users
            .iter()
            .filter(|user| user.team.as_ref().is_some_and(|team| teams.contains(team)))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        Ok(users)
    }

    fn fetch_user_by_email(&self, email: &str) -> SourceResult<Option<User>> {
        Ok(self.read()?.users.iter().find(|user| user.email == email).cloned())
    }

    fn fetch_weekend_entries(&self, user_email: &str) -> SourceResult<Vec<WeekendRow>> {
        Ok(self.read()?.weekend.get(user_email).cloned().unwrap_or_default())
    }

    fn fetch_weekly_series(&self, user_email: &str) -> SourceResult<Vec<WeeklySeriesRow>> {
        Ok(self.read()?.series.get(user_email).cloned().unwrap_or_default())
    }

    fn fetch_top_utilized(&self, scope: MvpScope) -> SourceResult<Vec<MvpRow>> {
        Ok(self.read()?.top.get(&scope).cloned().unwrap_or_default())
    }

    fn fetch_latest_update(&self) -> SourceResult<Option<NaiveDateTime>> {
        Ok(self.read()?.latest_update)
    }

    fn fetch_total_hours(&self, range: DateRange) -> SourceResult<f64> {
        let data = self.read()?;
        Ok(data
            .entries
            .iter()
            .filter(|(_, entry)| range.contains(entry.start_time.date()))
            .map(|(_, entry)| entry.duration_hours)
            .sum())
    }
}

impl ReviewStore for MemorySource {
    fn add_review(&self, user_email: &str, stars: u8, comments: &str) -> SourceResult<()> {
        drop(self.read()?);
        let mut data = self.write()?;
        let created_at = data.review_clock.unwrap_or_default();
        data.reviews.push(Review {
            user_email: user_email.to_string(),
            stars,
            comments: comments.to_string(),
            created_at,
        });
        Ok(())
    }

    fn average_rating(&self) -> SourceResult<Option<f64>> {
        let data = self.read()?;
        if data.reviews.is_empty() {
            return Ok(None);
        }
        let total: u32 = data.reviews.iter().map(|review| review.stars as u32).sum();
        Ok(Some(total as f64 / data.reviews.len() as f64))
    }

    fn fetch_reviews(&self) -> SourceResult<Vec<Review>> {
        let mut reviews = self.read()?.reviews.clone();
        reviews.reverse();
        Ok(reviews)
    }
}
