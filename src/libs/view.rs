use super::models::{
    BoardDistributionEntry, HierarchyNode, MonthlySummary, MvpEntry, Review, User, WeekendEntry, WeeklySeriesPoint,
    WeeklySummary,
};
use anyhow::Result;
use prettytable::{row, Table};

/// Terminal tables for every report.
pub struct View {}

impl View {
    /// Boards, groups and items as one indented table.
    pub fn hierarchy(boards: &[HierarchyNode]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["BOARD / GROUP / ITEM", "DURATION", "DATE", "CATEGORY"]);
        for board in boards {
            table.add_row(row![
                board.label,
                board.formatted_duration,
                "",
                board.category_name.as_deref().unwrap_or("")
            ]);
            for group in &board.children {
                table.add_row(row![format!("  {}", group.label), group.formatted_duration, "", ""]);
                for item in &group.children {
                    table.add_row(row![
                        format!("    {}", item.label),
                        item.formatted_duration,
                        item.entry_date.as_deref().unwrap_or(""),
                        ""
                    ]);
                }
            }
        }
        table.printstd();

        Ok(())
    }

    pub fn distribution(entries: &[BoardDistributionEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["BOARD", "HOURS", "SHARE"]);
        for entry in entries {
            table.add_row(row![entry.board_name, entry.formatted_hours, format!("{:.1}%", entry.percentage)]);
        }
        table.printstd();

        Ok(())
    }

    pub fn weekly(summary: &WeeklySummary) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["USER", "MON", "TUE", "WED", "THU", "FRI"]);
        table.add_row(row![
            summary.user_name,
            summary.monday,
            summary.tuesday,
            summary.wednesday,
            summary.thursday,
            summary.friday
        ]);
        table.printstd();

        Ok(())
    }

    pub fn monthly(months: &[MonthlySummary]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["MONTH", "YOU", "TEAM AVERAGE"]);
        for month in months {
            table.add_row(row![month.month_name, month.user_hours, month.team_average]);
        }
        table.printstd();

        Ok(())
    }

    pub fn weekend(entries: &[WeekendEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "BOARD", "GROUP", "ITEM", "DURATION"]);
        for entry in entries {
            table.add_row(row![
                entry.date.format("%a %Y-%m-%d"),
                entry.board_name,
                entry.group_name,
                entry.item_name,
                entry.formatted_duration
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn series(points: &[WeeklySeriesPoint]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["WEEK", "YOU", "TEAM AVERAGE", "IDEAL"]);
        for point in points {
            table.add_row(row![
                point.week_number,
                format!("{:.2}", point.user_hours),
                format!("{:.2}", point.avg_team_hours),
                format!("{:.2}", point.weekly_ideal)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn mvp(entries: &[MvpEntry]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "TITLE", "USER", "HOURS"]);
        for (index, entry) in entries.iter().enumerate() {
            table.add_row(row![
                index + 1,
                entry.title.as_deref().unwrap_or(""),
                entry.user_name,
                entry.formatted_hours
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn users(users: &[User]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["NAME", "EMAIL", "TYPE", "TEAM"]);
        for user in users {
            table.add_row(row![user.user_name, user.email, user.user_type, user.team.as_deref().unwrap_or("")]);
        }
        table.printstd();

        Ok(())
    }

    pub fn reviews(reviews: &[Review]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "USER", "STARS", "COMMENTS"]);
        for review in reviews {
            table.add_row(row![
                review.created_at.format("%Y-%m-%d %H:%M"),
                review.user_email,
                "★".repeat(review.stars as usize),
                review.comments
            ]);
        }
        table.printstd();

        Ok(())
    }
}
