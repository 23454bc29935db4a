//! # Configuration
//!
//! Manages the loading and parsing of the bot's configuration file (`config.yaml`).
//! Defines the structs for the Matrix connection, the dialog engine and team defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub teams: TeamDefaults,
    #[serde(default)]
    pub system: SystemConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DialogConfig {
    /// Exact text that aborts any running wizard
    #[serde(default = "default_quit_keyword")]
    pub quit_keyword: String,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            quit_keyword: default_quit_keyword(),
        }
    }
}

fn default_quit_keyword() -> String {
    "quit".to_string()
}

/// Values seeded into every newly created team.
#[derive(Debug, Deserialize, Clone)]
pub struct TeamDefaults {
    #[serde(default = "default_questions")]
    pub questions: Vec<String>,
    #[serde(default = "default_report_schedule")]
    pub report_schedule: String,
    #[serde(default = "default_reminder_before_secs")]
    pub first_reminder_before_secs: i64,
    #[serde(default = "default_reminder_before_secs")]
    pub last_reminder_before_secs: i64,
    #[serde(default = "default_split_report")]
    pub split_report: bool,
}

impl Default for TeamDefaults {
    fn default() -> Self {
        Self {
            questions: default_questions(),
            report_schedule: default_report_schedule(),
            first_reminder_before_secs: default_reminder_before_secs(),
            last_reminder_before_secs: default_reminder_before_secs(),
            split_report: default_split_report(),
        }
    }
}

fn default_questions() -> Vec<String> {
    vec![
        "What did you do yesterday?".to_string(),
        "What will you do today?".to_string(),
        "Are you being blocked by someone for a review? who? why?".to_string(),
    ]
}

fn default_report_schedule() -> String {
    "@every 30s".to_string()
}

fn default_reminder_before_secs() -> i64 {
    -8
}

fn default_split_report() -> bool {
    true
}

/// System-level settings for the bot.
#[derive(Debug, Deserialize, Clone)]
pub struct SystemConfig {
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
        }
    }
}

fn default_log_dir() -> String {
    "data".to_string()
}
