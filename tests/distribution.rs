#[cfg(test)]
mod tests {
    use utilboard::libs::distribution::board_distribution;
    use utilboard::libs::error::ErrorKind;
    use utilboard::libs::models::HierarchyNode;

    fn board(label: &str, duration: &str) -> HierarchyNode {
        HierarchyNode {
            label: label.to_string(),
            formatted_duration: duration.to_string(),
            entry_date: None,
            category_name: None,
            children: Vec::new(),
        }
    }

    fn tenths_total(shares: &[f64]) -> i64 {
        shares.iter().map(|p| (p * 10.0).round() as i64).sum()
    }

    #[test]
    fn test_shares_sorted_descending() {
        let boards = vec![board("Board B", "30m"), board("Board A", "1h 30m")];
        let distribution = board_distribution(&boards).unwrap();

        assert_eq!(distribution.len(), 2);
        assert_eq!(distribution[0].board_name, "Board A");
        assert_eq!(distribution[0].formatted_hours, "1h 30m");
        assert_eq!(distribution[0].percentage, 75.0);
        assert_eq!(distribution[1].board_name, "Board B");
        assert_eq!(distribution[1].percentage, 25.0);
    }

    #[test]
    fn test_single_board_takes_everything() {
        let distribution = board_distribution(&[board("Solo", "3h 10m")]).unwrap();
        assert_eq!(distribution[0].percentage, 100.0);
    }

    #[test]
    fn test_equal_thirds_are_plainly_rounded() {
        let boards = vec![board("A", "1h"), board("B", "1h"), board("C", "1h")];
        let distribution = board_distribution(&boards).unwrap();

        // 99.9 lies within tolerance, so nothing is redistributed
        let shares: Vec<f64> = distribution.iter().map(|d| d.percentage).collect();
        assert_eq!(shares, vec![33.3, 33.3, 33.3]);
        assert_eq!(tenths_total(&shares), 999);

        let names: Vec<&str> = distribution.iter().map(|d| d.board_name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sum_out_of_tolerance_is_corrected() {
        // Six plainly rounded shares of 16.7 would add up to 100.2
        let boards: Vec<HierarchyNode> = (0..6).map(|i| board(&format!("Board {}", i), "1h")).collect();
        let distribution = board_distribution(&boards).unwrap();

        let shares: Vec<(&str, f64)> = distribution.iter().map(|d| (d.board_name.as_str(), d.percentage)).collect();
        assert_eq!(
            shares,
            vec![
                ("Board 2", 16.7),
                ("Board 3", 16.7),
                ("Board 4", 16.7),
                ("Board 5", 16.7),
                ("Board 0", 16.6),
                ("Board 1", 16.6),
            ]
        );
        let percentages: Vec<f64> = shares.iter().map(|(_, p)| *p).collect();
        assert_eq!(tenths_total(&percentages), 1000);
    }

    #[test]
    fn test_sum_within_tolerance_is_kept() {
        // 1/7 and 6/7: 14.3 + 85.7 = 100.0; 2/3 and 1/3: 66.7 + 33.3 = 100.0
        let distribution = board_distribution(&[board("A", "1h"), board("B", "6h")]).unwrap();
        assert_eq!(distribution[0].percentage, 85.7);
        assert_eq!(distribution[1].percentage, 14.3);

        let distribution = board_distribution(&[board("A", "20m"), board("B", "40m")]).unwrap();
        assert_eq!(distribution[0].percentage, 66.7);
        assert_eq!(distribution[1].percentage, 33.3);
    }

    #[test]
    fn test_uneven_split() {
        let boards = vec![board("A", "1h"), board("B", "2h"), board("C", "4h")];
        let distribution = board_distribution(&boards).unwrap();

        let shares: Vec<(&str, f64)> = distribution.iter().map(|d| (d.board_name.as_str(), d.percentage)).collect();
        assert_eq!(shares, vec![("C", 57.1), ("B", 28.6), ("A", 14.3)]);
    }

    #[test]
    fn test_no_hours_yields_empty_distribution() {
        assert!(board_distribution(&[]).unwrap().is_empty());
        assert!(board_distribution(&[board("A", "0m"), board("B", "0m")]).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_duration_is_data_corruption() {
        let boards = vec![board("A", "1h"), board("B", "about an hour")];
        let err = board_distribution(&boards).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataCorruption);
    }
}
