use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleIdentity => "Identity settings".to_string(),
            Message::ConfigModuleReport => "Report settings".to_string(),
            Message::ConfigModuleStore => "Store settings".to_string(),
            Message::ConfigEnvironment(env) => format!("Environment: {}", env),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select sections to configure".to_string(),
            Message::PromptEnvironment => "Select the environment".to_string(),
            Message::PromptUserEmail => "Enter your email".to_string(),
            Message::PromptDevEmail => "Enter the development identity email".to_string(),
            Message::PromptCategoryPolicy => "When a board has mixed categories".to_string(),
            Message::PromptTeams => "Enter teams shown in the user list (comma separated)".to_string(),
            Message::PromptWeeklyIdealHours => "Enter ideal hours per week".to_string(),
            Message::PromptSeriesWeeks => "Enter number of weeks in the weekly series".to_string(),
            Message::PromptComparisonMonths => "Enter number of months in the monthly comparison".to_string(),
            Message::PromptWeekendWeeks => "Enter number of weeks the weekend report covers".to_string(),
            Message::PromptTopLimit => "Enter number of rows in top performer lists".to_string(),
            Message::PromptStorePath => "Enter database path (empty for default)".to_string(),

            // === STORE MESSAGES ===
            Message::DbMigrated(version) => format!("Database migrated to version {}", version),
            Message::DbUpToDate(version) => format!("Database is up to date (version {})", version),
            Message::ImportFileNotFound(path) => format!("Import file not found: {}", path),
            Message::ImportCompleted { users, entries } => {
                format!("Imported {} users and {} time entries", users, entries)
            }
            Message::SyncRecorded(at) => format!("Sync recorded at {}", at),

            // === REPORT MESSAGES ===
            Message::ReportHeader(title) => title.clone(),
            Message::NoEntriesFound(range) => format!("No entries found for {}", range),
            Message::NoDataFound => "No data found".to_string(),
            Message::ReportFailed { kind, message } => format!("[{}] {}", kind, message),
            Message::TotalHoursToday(hours) => format!("Total hours logged today: {}", hours),
            Message::LatestUpdate(at) => format!("Last data sync: {}", at),
            Message::IdentityResolved(email) => format!("Signed in as {}", email),

            // === REVIEW MESSAGES ===
            Message::ReviewAdded(stars) => format!("Thanks for the {}-star review", stars),
            Message::NoReviews => "No reviews yet".to_string(),
            Message::AverageRating(avg, count) => format!("Average rating: {:.2} from {} reviews", avg, count),
            Message::NoRatingsYet => "Nobody has rated the dashboard yet".to_string(),

            // === DASHBOARD MESSAGES ===
            Message::DashboardHeader(user) => format!("Utilization dashboard for {}", user),
            Message::DashboardSectionFailed(section) => format!("Section '{}' could not be loaded", section),
        };
        write!(f, "{}", s)
    }
}
