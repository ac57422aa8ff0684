#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;
    use test_context::{test_context, TestContext};
    use utilboard::libs::config::{Environment, ReportConfig};
    use utilboard::libs::error::ErrorKind;
    use utilboard::libs::hierarchy::CategoryPolicy;
    use utilboard::libs::models::{MonthlyHoursRow, MvpRow, MvpScope, TimeEntry, User, WeekendRow, WeeklyHoursRow, WeeklySeriesRow};
    use utilboard::libs::period::{FixedClock, WeekOption};
    use utilboard::libs::report::{IdentityPolicy, Outcome, Reports};
    use utilboard::libs::source::MemorySource;

    const ANN: &str = "ann@example.com";
    const BOB: &str = "bob@example.com";

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn user(name: &str, email: &str, team: Option<&str>) -> User {
        User {
            user_name: name.to_string(),
            email: email.to_string(),
            user_type: "Member".to_string(),
            team: team.map(str::to_string),
        }
    }

    /// Reports over canned rows, with "today" fixed to Wednesday 2024-03-13.
    struct ReportsContext {
        source: MemorySource,
        clock: FixedClock,
    }

    impl ReportsContext {
        fn reports(&self) -> Reports<MemorySource> {
            self.reports_with(IdentityPolicy::default(), ReportConfig::default())
        }

        fn reports_with(&self, identity: IdentityPolicy, settings: ReportConfig) -> Reports<MemorySource> {
            Reports::new(self.source.clone(), Arc::new(self.clock), identity, settings)
        }
    }

    impl TestContext for ReportsContext {
        fn setup() -> Self {
            let source = MemorySource::new();
            source.add_entry(ANN, TimeEntry::new("Board A", "G1", "x", at(11, 9), 0.5).with_category("Dev"));
            source.add_entry(ANN, TimeEntry::new("Board A", "G1", "y", at(12, 9), 1.0).with_category("Dev"));
            source.add_entry(ANN, TimeEntry::new("Board B", "G2", "z", at(13, 9), 0.5).with_category("Ops"));
            source.add_entry(ANN, TimeEntry::new("Board C", "G3", "old", at(1, 9), 3.0));
            source.add_entry(BOB, TimeEntry::new("Board A", "G1", "bob", at(13, 10), 2.0));

            source.add_user(user("Ann", ANN, Some("ES")));
            source.add_user(user("Bob", BOB, Some("TS")));
            source.add_user(user("Carl", "carl@example.com", Some("HR")));
            source.add_user(user("Abe", "abe@example.com", Some("ES")));

            ReportsContext {
                source,
                clock: FixedClock::on(2024, 3, 13).unwrap(),
            }
        }
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_entries_for_this_week(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().entries("ThisWeek", Some(ANN));
        let boards = outcome.data().unwrap();

        let labels: Vec<(&str, &str)> = boards.iter().map(|b| (b.label.as_str(), b.formatted_duration.as_str())).collect();
        assert_eq!(labels, vec![("Board A", "1h 30m"), ("Board B", "30m")]);
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_entries_for_a_month(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().entries("Month_2024_03", Some(ANN));
        let boards = outcome.into_data().unwrap();
        // Sorted by start time, so the entry from March 1st comes first
        assert_eq!(boards[0].label, "Board C");
        assert_eq!(boards.len(), 3);
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_entries_with_no_rows_are_empty_not_an_error(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().entries("Month_2023_01", Some(ANN));
        assert_eq!(outcome, Outcome::Success(Vec::new()));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_success_json_shape(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().entries("Today", Some(ANN));
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["ok"], true);
        assert_eq!(json["data"][0]["label"], "Board B");
        assert_eq!(json["data"][0]["categoryName"], "Ops");
        assert!(json.get("errorKind").is_none());
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_invalid_filter(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().entries("Someday", Some(ANN));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidFilter));

        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["ok"], false);
        assert_eq!(json["errorKind"], "InvalidFilter");
        assert_eq!(json["message"], "Invalid filter option: 'Someday'");
        assert!(json.get("data").is_none());
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_missing_identity(ctx: &mut ReportsContext) {
        let reports = ctx.reports();
        assert_eq!(reports.entries("Today", None).error_kind(), Some(ErrorKind::MissingIdentity));
        assert_eq!(reports.entries("Today", Some("   ")).error_kind(), Some(ErrorKind::MissingIdentity));
        assert_eq!(reports.weekly_series(None).error_kind(), Some(ErrorKind::MissingIdentity));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_identity_resolution_order(ctx: &mut ReportsContext) {
        let signed_in = IdentityPolicy {
            environment: Environment::Production,
            dev_email: Some(BOB.to_string()),
            email: Some(ANN.to_string()),
        };
        // Production ignores the development identity
        let outcome = ctx.reports_with(signed_in.clone(), ReportConfig::default()).entries("Today", None);
        assert_eq!(outcome.data().unwrap()[0].label, "Board B");

        let development = IdentityPolicy {
            environment: Environment::Development,
            ..signed_in
        };
        let reports = ctx.reports_with(development, ReportConfig::default());
        let outcome = reports.entries("Today", None);
        assert_eq!(outcome.data().unwrap()[0].children[0].children[0].label, "bob");

        // An explicit email always wins
        let outcome = reports.entries("Today", Some(ANN));
        assert_eq!(outcome.data().unwrap()[0].label, "Board B");
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_unavailable_source(ctx: &mut ReportsContext) {
        ctx.source.set_unavailable(true);
        let reports = ctx.reports();

        assert_eq!(reports.entries("Today", Some(ANN)).error_kind(), Some(ErrorKind::UpstreamUnavailable));
        assert_eq!(reports.total_hours_today().error_kind(), Some(ErrorKind::UpstreamUnavailable));
        assert_eq!(reports.reviews().error_kind(), Some(ErrorKind::UpstreamUnavailable));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_category_conflict_policy_from_settings(ctx: &mut ReportsContext) {
        ctx.source.add_entry(ANN, TimeEntry::new("Board B", "G2", "w", at(13, 11), 0.5).with_category("Dev"));
        let strict = ReportConfig {
            on_category_conflict: CategoryPolicy::Error,
            ..ReportConfig::default()
        };

        let outcome = ctx.reports_with(IdentityPolicy::default(), strict).entries("Today", Some(ANN));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::CategoryConflict));

        let outcome = ctx.reports().entries("Today", Some(ANN));
        assert_eq!(outcome.data().unwrap()[0].category_name.as_deref(), Some("Ops"));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_board_distribution(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().board_distribution("ThisWeek", Some(ANN));
        let shares: Vec<(String, f64)> = outcome
            .into_data()
            .unwrap()
            .into_iter()
            .map(|d| (d.board_name, d.percentage))
            .collect();
        assert_eq!(shares, vec![("Board A".to_string(), 75.0), ("Board B".to_string(), 25.0)]);
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_board_distribution_propagates_filter_errors(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().board_distribution("NextYear", Some(ANN));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::InvalidFilter));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_weekly_summary(ctx: &mut ReportsContext) {
        ctx.source.set_weekly_summary(
            WeekOption::Previous,
            ANN,
            WeeklyHoursRow {
                user_name: "Ann".to_string(),
                monday: 8.0,
                tuesday: 7.5,
                wednesday: 0.0,
                thursday: 0.25,
                friday: 6.999,
            },
        );
        let reports = ctx.reports();

        let summary = reports.weekly_summary("previous", Some(ANN)).into_data().unwrap();
        assert_eq!(summary.user_name, "Ann");
        assert_eq!(summary.monday, "8h");
        assert_eq!(summary.tuesday, "7h 30m");
        assert_eq!(summary.wednesday, "0m");
        assert_eq!(summary.thursday, "15m");
        assert_eq!(summary.friday, "7h");

        assert_eq!(reports.weekly_summary("current", Some(ANN)).error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(reports.weekly_summary("someday", Some(ANN)).error_kind(), Some(ErrorKind::InvalidFilter));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_monthly_comparison(ctx: &mut ReportsContext) {
        ctx.source.set_monthly_comparison(
            ANN,
            vec![
                MonthlyHoursRow {
                    month_name: "February 2024".to_string(),
                    team_average: 120.5,
                    user_hours: 130.0,
                },
                MonthlyHoursRow {
                    month_name: "March 2024".to_string(),
                    team_average: 40.25,
                    user_hours: 0.0,
                },
            ],
        );

        let months = ctx.reports().monthly_comparison(Some(ANN)).into_data().unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].team_average, "120h 30m");
        assert_eq!(months[0].user_hours, "130h");
        assert_eq!(months[1].team_average, "40h 15m");
        assert_eq!(months[1].user_hours, "0m");
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_users_of_configured_teams(ctx: &mut ReportsContext) {
        let users = ctx.reports().users(Some(ANN)).into_data().unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.user_name.as_str()).collect();
        assert_eq!(names, vec!["Abe", "Ann", "Bob"]);
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_users_requires_a_known_requester(ctx: &mut ReportsContext) {
        let outcome = ctx.reports().users(Some("stranger@example.com"));
        assert_eq!(outcome.error_kind(), Some(ErrorKind::NotFound));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_user_info(ctx: &mut ReportsContext) {
        let reports = ctx.reports();
        assert_eq!(reports.user_info(BOB).into_data().unwrap().team.as_deref(), Some("TS"));
        assert_eq!(reports.user_info("nobody@example.com").error_kind(), Some(ErrorKind::NotFound));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_user_info_ignores_the_configured_identity(ctx: &mut ReportsContext) {
        let development = IdentityPolicy {
            environment: Environment::Development,
            dev_email: Some(BOB.to_string()),
            email: Some(ANN.to_string()),
        };
        let reports = ctx.reports_with(development, ReportConfig::default());

        assert_eq!(reports.user_info("").error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(reports.user_info("   ").error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(reports.user_info(&format!("  {}  ", ANN)).into_data().unwrap().user_name, "Ann");
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_weekend_hours(ctx: &mut ReportsContext) {
        ctx.source.set_weekend_entries(
            ANN,
            vec![WeekendRow {
                date: at(10, 14),
                board_name: "Board A".to_string(),
                group_name: "G1".to_string(),
                item_name: "hotfix".to_string(),
                duration_hours: 1.3333,
            }],
        );

        let rows = ctx.reports().weekend_hours(Some(ANN)).into_data().unwrap();
        assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(rows[0].duration_hours, 1.33);
        assert_eq!(rows[0].formatted_duration, "1h 20m");

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["date"], "2024-03-10");
        assert_eq!(json["itemName"], "hotfix");
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_weekly_series_is_rounded(ctx: &mut ReportsContext) {
        ctx.source.set_weekly_series(
            ANN,
            vec![WeeklySeriesRow {
                week_number: 11,
                user_hours: 37.456,
                avg_team_hours: 35.0,
                weekly_ideal: 40.0,
            }],
        );

        let points = ctx.reports().weekly_series(Some(ANN)).into_data().unwrap();
        assert_eq!(points[0].week_number, 11);
        assert_eq!(points[0].user_hours, 37.46);
        assert_eq!(points[0].weekly_ideal, 40.0);
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_top_utilized(ctx: &mut ReportsContext) {
        ctx.source.set_top_utilized(
            MvpScope::TopPerformances,
            vec![MvpRow {
                title: Some("Top Performer of the Week".to_string()),
                user_name: "Bob".to_string(),
                total_hours: 41.75,
            }],
        );
        let reports = ctx.reports();

        let top = reports.top_utilized(MvpScope::TopPerformances).into_data().unwrap();
        assert_eq!(top[0].formatted_hours, "41h 45m");
        assert_eq!(top[0].title.as_deref(), Some("Top Performer of the Week"));

        assert_eq!(reports.top_utilized(MvpScope::Overall), Outcome::Success(Vec::new()));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_latest_update(ctx: &mut ReportsContext) {
        assert_eq!(ctx.reports().latest_update().error_kind(), Some(ErrorKind::NotFound));

        ctx.source.set_latest_update(at(13, 6));
        assert_eq!(ctx.reports().latest_update(), Outcome::Success(at(13, 6)));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_total_hours_today_counts_everyone(ctx: &mut ReportsContext) {
        let total = ctx.reports().total_hours_today().into_data().unwrap();
        assert_eq!(total.hours, 2.5);
        assert_eq!(total.formatted, "2h 30m");
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_reviews(ctx: &mut ReportsContext) {
        let reports = ctx.reports();
        assert_eq!(reports.average_rating(), Outcome::Success(None));

        ctx.source.set_review_clock(at(12, 8));
        assert!(reports.add_review(Some(ANN), 5, "  great  ").is_ok());
        ctx.source.set_review_clock(at(13, 8));
        assert!(reports.add_review(Some(BOB), 4, "").is_ok());
        assert!(reports.add_review(Some(BOB), 4, "again").is_ok());

        assert_eq!(reports.average_rating(), Outcome::Success(Some(4.33)));

        let reviews = reports.reviews().into_data().unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews[0].comments, "again");
        assert_eq!(reviews[2].comments, "great");
        assert_eq!(reviews[2].created_at, at(12, 8));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_review_stars_out_of_range(ctx: &mut ReportsContext) {
        let reports = ctx.reports();
        assert_eq!(reports.add_review(Some(ANN), 0, "").error_kind(), Some(ErrorKind::InvalidInput));
        assert_eq!(reports.add_review(Some(ANN), 6, "").error_kind(), Some(ErrorKind::InvalidInput));
        assert_eq!(reports.add_review(None, 3, "").error_kind(), Some(ErrorKind::MissingIdentity));
        assert_eq!(reports.reviews(), Outcome::Success(Vec::new()));
    }

    #[test_context(ReportsContext)]
    #[test]
    fn test_unit_success_serializes_null_data(ctx: &mut ReportsContext) {
        let json = serde_json::to_value(ctx.reports().add_review(Some(ANN), 3, "ok")).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "data": null }));
    }
}
