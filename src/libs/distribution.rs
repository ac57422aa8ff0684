//! Percentage share of each board in a report.
//!
//! Board hours are taken from the formatted durations of the hierarchy (the
//! `"1h 30m"` strings), not from raw sums. Precision is therefore bounded by
//! the minute rounding applied when the hierarchy was built.
//!
//! Each percentage is `hours / total * 100` rounded to one decimal. The
//! rounded set is left alone while it sums to within 0.1 of 100. Only when
//! rounding drifts further (six equal boards give 100.2) are the values with
//! the largest rounding error nudged by 0.1 until the set sums to 100.0.

use crate::libs::error::ReportResult;
use crate::libs::formatter::parse_hours;
use crate::libs::models::{BoardDistributionEntry, HierarchyNode};
use std::cmp::Ordering;

/// Tenths of a percent in a whole.
const TENTHS_TOTAL: i64 = 1000;

/// Largest drift of the rounded sum, in tenths, that is left uncorrected.
const TENTHS_TOLERANCE: i64 = 1;

/// Computes the distribution for the board level of a hierarchy.
///
/// Returns an empty list when there are no boards or no hours at all. Fails
/// with `DataCorruption` when a board duration cannot be parsed back.
pub fn board_distribution(boards: &[HierarchyNode]) -> ReportResult<Vec<BoardDistributionEntry>> {
    let hours = boards
        .iter()
        .map(|board| parse_hours(&board.formatted_duration))
        .collect::<ReportResult<Vec<f64>>>()?;

    let total: f64 = hours.iter().sum();
    if total <= 0.0 {
        return Ok(Vec::new());
    }

    let tenths = rounded_tenths(&hours, total);

    let mut distribution: Vec<BoardDistributionEntry> = boards
        .iter()
        .zip(tenths)
        .map(|(board, tenths)| BoardDistributionEntry {
            board_name: board.label.clone(),
            formatted_hours: board.formatted_duration.clone(),
            percentage: tenths as f64 / 10.0,
        })
        .collect();

    // Stable sort keeps input order between equal shares.
    distribution.sort_by(|a, b| b.percentage.partial_cmp(&a.percentage).unwrap_or(Ordering::Equal));

    tracing::debug!(boards = distribution.len(), total_hours = total, "board distribution computed");
    Ok(distribution)
}

/// One-decimal percentages in tenths, corrected only when their sum leaves 100 ± 0.1.
fn rounded_tenths(hours: &[f64], total: f64) -> Vec<i64> {
    let exact: Vec<f64> = hours.iter().map(|h| h / total * TENTHS_TOTAL as f64).collect();
    let mut shares: Vec<i64> = exact.iter().map(|value| value.round() as i64).collect();

    let drift = shares.iter().sum::<i64>() - TENTHS_TOTAL;
    if drift.abs() <= TENTHS_TOLERANCE {
        return shares;
    }
    tracing::debug!(drift, "rounded shares out of tolerance, correcting");

    // Rounded up too far: take from the values rounded up the most. Too little: the reverse.
    let step = -drift.signum();
    let error = |index: usize| (shares[index] as f64 - exact[index]) * drift.signum() as f64;
    let mut by_error: Vec<usize> = (0..exact.len()).collect();
    by_error.sort_by(|&a, &b| error(b).partial_cmp(&error(a)).unwrap_or(Ordering::Equal));

    for index in by_error.into_iter().take(drift.unsigned_abs() as usize) {
        shares[index] += step;
    }

    shares
}
