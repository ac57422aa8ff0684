//! Duration formatting for every report.
//!
//! Durations arrive as fractional hours (`1.5` = one hour thirty minutes) and
//! are displayed in a compact form:
//!
//! - under one hour: `"45m"`
//! - whole hours: `"2h"`
//! - hours and minutes: `"1h 30m"`
//!
//! Minutes are rounded to the nearest integer and a rounding that reaches 60
//! carries into the hour, so `0.999` is `"1h"` rather than `"60m"`.
//!
//! [`parse_hours`] is the inverse, used where a formatted value has to be
//! turned back into a number. The round-trip is lossy only up to the minute
//! rounding above.
//!
//! ## Examples
//!
//! ```rust
//! use utilboard::libs::formatter::{format_hours, parse_hours};
//!
//! assert_eq!(format_hours(0.5), "30m");
//! assert_eq!(format_hours(1.5), "1h 30m");
//! assert_eq!(format_hours(2.0), "2h");
//! assert_eq!(parse_hours("1h 30m").unwrap(), 1.5);
//! ```

use crate::libs::error::{ReportError, ReportResult};

/// Formats fractional hours as `"{h}h {m}m"`, `"{h}h"` or `"{m}m"`.
///
/// Negative and non-finite values are treated as zero and yield `"0m"`.
pub fn format_hours(hours: f64) -> String {
    let hours = if hours.is_finite() { hours.max(0.0) } else { 0.0 };
    let total_minutes = (hours * 60.0).round() as u64;
    let (whole_hours, minutes) = (total_minutes / 60, total_minutes % 60);

    match (whole_hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Parses a string produced by [`format_hours`] back into fractional hours.
///
/// Every whitespace-separated token must be a number followed by `h` or `m`.
/// Anything else is reported as [`ReportError::DataCorruption`].
pub fn parse_hours(text: &str) -> ReportResult<f64> {
    let corrupt = || ReportError::DataCorruption(text.to_string());

    let mut tokens = text.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return Err(corrupt());
    }

    let mut hours = 0.0;
    for token in tokens {
        if let Some(value) = token.strip_suffix('h') {
            hours += value.parse::<f64>().map_err(|_| corrupt())?;
        } else if let Some(value) = token.strip_suffix('m') {
            hours += value.parse::<f64>().map_err(|_| corrupt())? / 60.0;
        } else {
            return Err(corrupt());
        }
    }

    if hours.is_finite() && hours >= 0.0 {
        Ok(hours)
    } else {
        Err(corrupt())
    }
}
