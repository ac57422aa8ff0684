/// Every user-facing message of the application.
///
/// Text lives in the `Display` implementation in `display.rs`.
#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigModuleIdentity,
    ConfigModuleReport,
    ConfigModuleStore,
    ConfigEnvironment(String),

    // === PROMPTS ===
    PromptSelectModules,
    PromptEnvironment,
    PromptUserEmail,
    PromptDevEmail,
    PromptCategoryPolicy,
    PromptTeams,
    PromptWeeklyIdealHours,
    PromptSeriesWeeks,
    PromptComparisonMonths,
    PromptWeekendWeeks,
    PromptTopLimit,
    PromptStorePath,

    // === STORE MESSAGES ===
    DbMigrated(usize),
    DbUpToDate(usize),
    ImportFileNotFound(String),
    ImportCompleted { users: usize, entries: usize },
    SyncRecorded(String),

    // === REPORT MESSAGES ===
    ReportHeader(String),
    NoEntriesFound(String),
    NoDataFound,
    ReportFailed { kind: String, message: String },
    TotalHoursToday(String),
    LatestUpdate(String),
    IdentityResolved(String),

    // === REVIEW MESSAGES ===
    ReviewAdded(u8),
    NoReviews,
    AverageRating(f64, usize),
    NoRatingsYet,

    // === DASHBOARD MESSAGES ===
    DashboardHeader(String),
    DashboardSectionFailed(String),
}
