//! Builds the board → group → item tree shown in the entries report.
//!
//! Input rows are flat [`TimeEntry`] values. The output keeps the order in
//! which boards and groups are first seen in the input, never alphabetical,
//! so identical inputs always produce identical trees.
//!
//! ```text
//! Board A            1h 30m   (category)
//! └── Group G1       1h 30m
//!     ├── x          30m      Monday 03-11
//!     └── y          1h       Tuesday 03-12
//! ```
//!
//! Board and group durations are the formatted sum of the raw durations
//! beneath them. Items are not summed: every entry becomes its own leaf.

use crate::libs::error::{ReportError, ReportResult};
use crate::libs::formatter::format_hours;
use crate::libs::models::{HierarchyNode, TimeEntry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How to pick a board's category when its entries disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoryPolicy {
    /// The first entry's category is used, whatever the others carry.
    #[default]
    FirstWins,
    /// More than one distinct category on a board is an error.
    Error,
    /// The most frequent category; ties go to the one seen first.
    Majority,
}

/// Format of the leaf date column, e.g. `"Wednesday 03-13"`.
pub const ENTRY_DATE_FORMAT: &str = "%A %m-%d";

/// Groups `items` by `key`, keeping first-seen order of keys and input order within each group.
fn group_ordered<'a, F>(items: &[&'a TimeEntry], key: F) -> Vec<(&'a str, Vec<&'a TimeEntry>)>
where
    F: Fn(&'a TimeEntry) -> &'a str,
{
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&TimeEntry>)> = Vec::new();

    for &item in items {
        let name = key(item);
        match positions.get(name) {
            Some(&index) => groups[index].1.push(item),
            None => {
                positions.insert(name, groups.len());
                groups.push((name, vec![item]));
            }
        }
    }

    groups
}

fn total_hours(entries: &[&TimeEntry]) -> f64 {
    entries.iter().map(|entry| entry.duration_hours).sum()
}

/// Picks the category of one board's entries according to `policy`.
fn board_category(board: &str, entries: &[&TimeEntry], policy: CategoryPolicy) -> ReportResult<Option<String>> {
    let first = entries.first().and_then(|entry| entry.category_name.clone());

    match policy {
        CategoryPolicy::FirstWins => Ok(first),
        CategoryPolicy::Error => {
            let mut distinct: Vec<&Option<String>> = Vec::new();
            for entry in entries {
                if !distinct.contains(&&entry.category_name) {
                    distinct.push(&entry.category_name);
                }
            }
            if distinct.len() > 1 {
                let categories = distinct
                    .iter()
                    .map(|category| category.as_deref().unwrap_or("<none>"))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(ReportError::CategoryConflict {
                    board: board.to_string(),
                    categories,
                });
            }
            Ok(first)
        }
        CategoryPolicy::Majority => {
            // (category, count) in first-seen order
            let mut counts: Vec<(&Option<String>, usize)> = Vec::new();
            for entry in entries {
                match counts.iter_mut().find(|(category, _)| *category == &entry.category_name) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((&entry.category_name, 1)),
                }
            }
            let mut winner: Option<(&Option<String>, usize)> = None;
            for (category, count) in counts {
                if winner.map_or(true, |(_, best)| count > best) {
                    winner = Some((category, count));
                }
            }
            Ok(winner.and_then(|(category, _)| category.clone()))
        }
    }
}

fn leaf(entry: &TimeEntry) -> HierarchyNode {
    HierarchyNode {
        label: entry.item_name.clone(),
        formatted_duration: format_hours(entry.duration_hours),
        entry_date: Some(entry.start_time.format(ENTRY_DATE_FORMAT).to_string()),
        category_name: None,
        children: Vec::new(),
    }
}

/// Builds the three-level hierarchy for `entries`.
///
/// Fails only when `policy` is [`CategoryPolicy::Error`] and a board carries
/// more than one category. Empty input yields an empty tree.
pub fn build_hierarchy(entries: &[TimeEntry], policy: CategoryPolicy) -> ReportResult<Vec<HierarchyNode>> {
    let refs: Vec<&TimeEntry> = entries.iter().collect();
    let mut boards = Vec::new();

    for (board_name, board_entries) in group_ordered(&refs, |entry| entry.board_name.as_str()) {
        let category_name = board_category(board_name, &board_entries, policy)?;

        let groups: Vec<HierarchyNode> = group_ordered(&board_entries, |entry| entry.group_name.as_str())
            .into_iter()
            .map(|(group_name, group_entries)| {
                let node = HierarchyNode {
                    label: group_name.to_string(),
                    formatted_duration: format_hours(total_hours(&group_entries)),
                    entry_date: None,
                    category_name: None,
                    children: group_entries.iter().map(|entry| leaf(entry)).collect(),
                };
                tracing::debug!(group = group_name, hours = %node.formatted_duration, items = node.children.len(), "group shaped");
                node
            })
            .collect();

        let node = HierarchyNode {
            label: board_name.to_string(),
            formatted_duration: format_hours(total_hours(&board_entries)),
            entry_date: None,
            category_name,
            children: groups,
        };
        tracing::debug!(
            board = board_name,
            category = node.category_name.as_deref().unwrap_or("-"),
            hours = %node.formatted_duration,
            groups = node.children.len(),
            "board shaped"
        );
        boards.push(node);
    }

    Ok(boards)
}
