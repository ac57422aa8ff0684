#[cfg(test)]
mod tests {
    use utilboard::libs::error::ErrorKind;
    use utilboard::libs::formatter::{format_hours, parse_hours};

    #[test]
    fn test_format_minutes_only() {
        assert_eq!(format_hours(0.0), "0m");
        assert_eq!(format_hours(0.25), "15m");
        assert_eq!(format_hours(0.75), "45m");
    }

    #[test]
    fn test_format_whole_hours() {
        assert_eq!(format_hours(1.0), "1h");
        assert_eq!(format_hours(8.0), "8h");
        assert_eq!(format_hours(40.0), "40h");
    }

    #[test]
    fn test_format_hours_and_minutes() {
        assert_eq!(format_hours(1.5), "1h 30m");
        assert_eq!(format_hours(2.25), "2h 15m");
        assert_eq!(format_hours(10.1), "10h 6m");
    }

    #[test]
    fn test_format_rounds_to_nearest_minute() {
        // 1/3 hour is 20 minutes
        assert_eq!(format_hours(1.0 / 3.0), "20m");
        // 0.0083 hours is just under half a minute
        assert_eq!(format_hours(0.0083), "0m");
        assert_eq!(format_hours(0.009), "1m");
    }

    #[test]
    fn test_format_carries_sixty_minutes_into_hour() {
        assert_eq!(format_hours(0.999), "1h");
        assert_eq!(format_hours(1.9999), "2h");
    }

    #[test]
    fn test_format_invalid_input_is_zero() {
        assert_eq!(format_hours(-1.5), "0m");
        assert_eq!(format_hours(f64::NAN), "0m");
        assert_eq!(format_hours(f64::INFINITY), "0m");
    }

    #[test]
    fn test_parse_formatted_values() {
        assert_eq!(parse_hours("30m").unwrap(), 0.5);
        assert_eq!(parse_hours("2h").unwrap(), 2.0);
        assert_eq!(parse_hours("1h 30m").unwrap(), 1.5);
        assert_eq!(parse_hours("  3h   15m ").unwrap(), 3.25);
    }

    #[test]
    fn test_parse_inverts_format_up_to_a_minute() {
        for hours in [0.1, 0.5, 1.0, 1.75, 7.33, 12.5] {
            let parsed = parse_hours(&format_hours(hours)).unwrap();
            assert!((parsed - hours).abs() <= 1.0 / 60.0, "{} parsed back as {}", hours, parsed);
        }
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        for text in ["", "   ", "1.5", "h", "1x", "one hour", "-2h"] {
            let err = parse_hours(text).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DataCorruption, "{:?} should be rejected", text);
        }
    }
}
