#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use utilboard::libs::error::ReportError;
    use utilboard::libs::hierarchy::{build_hierarchy, CategoryPolicy};
    use utilboard::libs::models::TimeEntry;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    fn sample() -> Vec<TimeEntry> {
        vec![
            TimeEntry::new("Board A", "G1", "x", at(11, 9), 0.5).with_category("Dev"),
            TimeEntry::new("Board A", "G1", "y", at(12, 9), 1.0).with_category("Dev"),
            TimeEntry::new("Board B", "G2", "z", at(13, 9), 2.0).with_category("Ops"),
        ]
    }

    #[test]
    fn test_builds_three_levels() {
        let boards = build_hierarchy(&sample(), CategoryPolicy::FirstWins).unwrap();

        assert_eq!(boards.len(), 2);
        let board_a = &boards[0];
        assert_eq!(board_a.label, "Board A");
        assert_eq!(board_a.formatted_duration, "1h 30m");
        assert_eq!(board_a.category_name.as_deref(), Some("Dev"));
        assert_eq!(board_a.entry_date, None);

        let group = &board_a.children[0];
        assert_eq!(group.label, "G1");
        assert_eq!(group.formatted_duration, "1h 30m");
        assert_eq!(group.category_name, None);

        let items: Vec<(&str, &str, Option<&str>)> = group
            .children
            .iter()
            .map(|item| (item.label.as_str(), item.formatted_duration.as_str(), item.entry_date.as_deref()))
            .collect();
        assert_eq!(items, vec![("x", "30m", Some("Monday 03-11")), ("y", "1h", Some("Tuesday 03-12"))]);
        assert!(group.children.iter().all(|item| item.children.is_empty()));

        let board_b = &boards[1];
        assert_eq!(board_b.formatted_duration, "2h");
        assert_eq!(board_b.category_name.as_deref(), Some("Ops"));
        assert_eq!(board_b.children[0].children[0].entry_date.as_deref(), Some("Wednesday 03-13"));
    }

    #[test]
    fn test_keeps_first_seen_order() {
        let entries = vec![
            TimeEntry::new("Zeta", "G2", "a", at(11, 9), 1.0),
            TimeEntry::new("Alpha", "G1", "b", at(11, 10), 1.0),
            TimeEntry::new("Zeta", "G1", "c", at(11, 11), 1.0),
            TimeEntry::new("Zeta", "G2", "d", at(11, 12), 1.0),
        ];
        let boards = build_hierarchy(&entries, CategoryPolicy::FirstWins).unwrap();

        let labels: Vec<&str> = boards.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha"]);

        let zeta_groups: Vec<&str> = boards[0].children.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(zeta_groups, vec!["G2", "G1"]);
        assert_eq!(boards[0].children[0].children.len(), 2);
        assert_eq!(boards[0].formatted_duration, "3h");
    }

    #[test]
    fn test_items_are_not_merged() {
        let entries = vec![
            TimeEntry::new("Board A", "G1", "x", at(11, 9), 0.5),
            TimeEntry::new("Board A", "G1", "x", at(11, 14), 0.5),
        ];
        let boards = build_hierarchy(&entries, CategoryPolicy::FirstWins).unwrap();
        assert_eq!(boards[0].children[0].children.len(), 2);
        assert_eq!(boards[0].formatted_duration, "1h");
    }

    #[test]
    fn test_board_total_sums_raw_durations() {
        // Each item rounds to 0m but the board total does not
        let entries: Vec<TimeEntry> = (0..6).map(|i| TimeEntry::new("Board A", "G1", "tick", at(11, 9 + i), 0.005)).collect();
        let boards = build_hierarchy(&entries, CategoryPolicy::FirstWins).unwrap();
        assert_eq!(boards[0].children[0].children[0].formatted_duration, "0m");
        assert_eq!(boards[0].formatted_duration, "2m");
    }

    #[test]
    fn test_empty_input_yields_empty_tree() {
        assert!(build_hierarchy(&[], CategoryPolicy::Error).unwrap().is_empty());
    }

    #[test]
    fn test_category_conflict_policies() {
        let entries = vec![
            TimeEntry::new("Board A", "G1", "x", at(11, 9), 1.0).with_category("Dev"),
            TimeEntry::new("Board A", "G1", "y", at(11, 10), 1.0).with_category("Ops"),
            TimeEntry::new("Board A", "G2", "z", at(11, 11), 1.0).with_category("Ops"),
        ];

        let first = build_hierarchy(&entries, CategoryPolicy::FirstWins).unwrap();
        assert_eq!(first[0].category_name.as_deref(), Some("Dev"));

        let majority = build_hierarchy(&entries, CategoryPolicy::Majority).unwrap();
        assert_eq!(majority[0].category_name.as_deref(), Some("Ops"));

        match build_hierarchy(&entries, CategoryPolicy::Error) {
            Err(ReportError::CategoryConflict { board, categories }) => {
                assert_eq!(board, "Board A");
                assert_eq!(categories, "Dev, Ops");
            }
            other => panic!("expected a category conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_majority_tie_goes_to_first_seen() {
        let entries = vec![
            TimeEntry::new("Board A", "G1", "x", at(11, 9), 1.0).with_category("Ops"),
            TimeEntry::new("Board A", "G1", "y", at(11, 10), 1.0).with_category("Dev"),
        ];
        let boards = build_hierarchy(&entries, CategoryPolicy::Majority).unwrap();
        assert_eq!(boards[0].category_name.as_deref(), Some("Ops"));
    }

    #[test]
    fn test_consistent_categories_pass_the_strict_policy() {
        let boards = build_hierarchy(&sample(), CategoryPolicy::Error).unwrap();
        assert_eq!(boards.len(), 2);
    }

    #[test]
    fn test_json_shape() {
        let boards = build_hierarchy(&sample(), CategoryPolicy::FirstWins).unwrap();
        let json = serde_json::to_value(&boards[0]).unwrap();

        assert_eq!(json["label"], "Board A");
        assert_eq!(json["formattedDuration"], "1h 30m");
        assert_eq!(json["categoryName"], "Dev");
        assert!(json.get("entryDate").is_none());
        assert_eq!(json["children"][0]["children"][0]["entryDate"], "Monday 03-11");
        assert!(json["children"][0].get("categoryName").is_none());
    }
}
