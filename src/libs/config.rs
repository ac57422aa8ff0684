//! Configuration for the utilboard application.
//!
//! Settings live in a single JSON file in the platform data directory and are
//! grouped into optional sections, so a freshly installed tool works with an
//! empty file:
//!
//! - **environment**: `production` or `development`; development enables the
//!   fixed developer identity
//! - **identity**: the signed-in user's email and the developer identity
//! - **report**: category conflict policy, teams shown in the user list and
//!   the windows used by the windowed reports
//! - **store**: location of the SQLite database
//!
//! Two environment variables override the file after it is loaded (a `.env`
//! file in the working directory is honored as well):
//!
//! - `UTILBOARD_ENV`: `production` or `development`
//! - `UTILBOARD_USER_EMAIL`: the signed-in user's email
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use utilboard::libs::config::Config;
//!
//! let config = Config::read()?;
//! let report = config.report.clone().unwrap_or_default();
//! println!("Teams: {}", report.teams.join(", "));
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::hierarchy::CategoryPolicy;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Overrides the configured environment.
pub const ENV_ENVIRONMENT: &str = "UTILBOARD_ENV";

/// Overrides the signed-in user's email.
pub const ENV_USER_EMAIL: &str = "UTILBOARD_USER_EMAIL";

/// Represents a configurable section shown by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Deployment environment.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Production => f.write_str("production"),
            Environment::Development => f.write_str("development"),
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(format!("unknown environment '{}'", other)),
        }
    }
}

/// Who the current user is.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct IdentityConfig {
    /// Verified email of the signed-in user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Identity used by every report in the development environment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_email: Option<String>,
}

/// Report shaping and window settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// What to do when entries of one board carry different categories.
    #[serde(alias = "onCategoryConflict")]
    pub on_category_conflict: CategoryPolicy,

    /// Teams whose members appear in the user list.
    pub teams: Vec<String>,

    /// Target hours per week drawn as the ideal line of the weekly series.
    pub weekly_ideal_hours: f64,

    /// Number of weeks in the weekly series.
    pub series_weeks: u32,

    /// Number of months in the monthly comparison, current month included.
    pub comparison_months: u32,

    /// How many past weeks the weekend report looks back.
    pub weekend_weeks: u32,

    /// Rows returned by the top performer lists.
    pub top_limit: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            on_category_conflict: CategoryPolicy::FirstWins,
            teams: vec!["ES".to_string(), "TS".to_string()],
            weekly_ideal_hours: 40.0,
            series_weeks: 12,
            comparison_months: 6,
            weekend_weeks: 4,
            top_limit: 5,
        }
    }
}

/// Where the SQLite database lives.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct StoreConfig {
    /// Database file. Defaults to `utilboard.db` in the data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Root configuration object.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub environment: Environment,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<IdentityConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,
}

impl Config {
    /// Reads the configuration from the data directory and applies environment overrides.
    ///
    /// A missing file yields the default configuration. A file that exists but
    /// cannot be parsed is an error.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let mut config = Self::read_from(&config_file_path)?;
        config.apply_env();
        Ok(config)
    }

    /// Reads the configuration from an explicit file without environment overrides.
    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration to the data directory as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Applies `UTILBOARD_ENV` and `UTILBOARD_USER_EMAIL` on top of the file values.
    ///
    /// An unparseable `UTILBOARD_ENV` is ignored with a warning.
    pub fn apply_env(&mut self) {
        if let Ok(value) = env::var(ENV_ENVIRONMENT) {
            match value.parse::<Environment>() {
                Ok(environment) => self.environment = environment,
                Err(error) => tracing::warn!(variable = ENV_ENVIRONMENT, "{}", error),
            }
        }

        if let Ok(email) = env::var(ENV_USER_EMAIL) {
            let email = email.trim();
            if !email.is_empty() {
                self.identity.get_or_insert_with(IdentityConfig::default).email = Some(email.to_string());
            }
        }
    }

    /// Database path from the store section, or the default in the data directory.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store.as_ref().and_then(|store| store.path.clone())
    }

    /// Runs the interactive setup wizard, starting from the saved configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "identity".to_string(),
                name: "Identity".to_string(),
            },
            ConfigModule {
                key: "report".to_string(),
                name: "Reports".to_string(),
            },
            ConfigModule {
                key: "store".to_string(),
                name: "Store".to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "identity" => config.init_identity()?,
                "report" => config.init_report()?,
                "store" => config.init_store()?,
                _ => {}
            }
        }

        Ok(config)
    }

    fn init_identity(&mut self) -> Result<()> {
        let default = self.identity.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleIdentity);

        let environments = [Environment::Production, Environment::Development];
        let current = environments.iter().position(|e| *e == self.environment).unwrap_or(0);
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptEnvironment.to_string())
            .items(&environments)
            .default(current)
            .interact()?;
        self.environment = environments[choice];

        let email: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUserEmail.to_string())
            .default(default.email.clone().unwrap_or_default())
            .allow_empty(true)
            .interact_text()?;

        let dev_email = if self.environment == Environment::Development {
            let value: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptDevEmail.to_string())
                .default(default.dev_email.clone().unwrap_or_default())
                .allow_empty(true)
                .interact_text()?;
            Some(value)
        } else {
            default.dev_email
        };

        let non_empty = |value: Option<String>| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        self.identity = Some(IdentityConfig {
            email: non_empty(Some(email)),
            dev_email: non_empty(dev_email),
        });
        Ok(())
    }

    fn init_report(&mut self) -> Result<()> {
        let default = self.report.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleReport);

        let policies = [CategoryPolicy::FirstWins, CategoryPolicy::Majority, CategoryPolicy::Error];
        let labels = ["first entry wins", "most frequent wins", "report an error"];
        let current = policies.iter().position(|p| *p == default.on_category_conflict).unwrap_or(0);
        let policy = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptCategoryPolicy.to_string())
            .items(&labels)
            .default(current)
            .interact()?;

        let teams: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTeams.to_string())
            .default(default.teams.join(","))
            .interact_text()?;

        self.report = Some(ReportConfig {
            on_category_conflict: policies[policy],
            teams: teams
                .split(',')
                .map(str::trim)
                .filter(|team| !team.is_empty())
                .map(str::to_string)
                .collect(),
            weekly_ideal_hours: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptWeeklyIdealHours.to_string())
                .default(default.weekly_ideal_hours)
                .interact_text()?,
            series_weeks: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptSeriesWeeks.to_string())
                .default(default.series_weeks)
                .interact_text()?,
            comparison_months: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptComparisonMonths.to_string())
                .default(default.comparison_months)
                .interact_text()?,
            weekend_weeks: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptWeekendWeeks.to_string())
                .default(default.weekend_weeks)
                .interact_text()?,
            top_limit: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTopLimit.to_string())
                .default(default.top_limit)
                .interact_text()?,
        });
        Ok(())
    }

    fn init_store(&mut self) -> Result<()> {
        msg_print!(Message::ConfigModuleStore);
        let current = self
            .store_path()
            .map(|path| path.display().to_string())
            .unwrap_or_default();

        let path: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStorePath.to_string())
            .default(current)
            .allow_empty(true)
            .interact_text()?;

        let path = path.trim();
        self.store = Some(StoreConfig {
            path: (!path.is_empty()).then(|| PathBuf::from(path)),
        });
        Ok(())
    }
}
