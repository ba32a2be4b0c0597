//! Configuration management for the circulation engine

use chrono::NaiveDate;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    pub records_path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    pub directory: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Environment variables with prefix CIRCULATION_ (e.g. CIRCULATION_REPORTS__DIRECTORY)
            .add_source(
                Environment::with_prefix("CIRCULATION")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("data.records_path", env::var("RECORDS_PATH").ok())?
            .build()?;

        config.try_deserialize()
    }
}

/// Resolve the reference date for a report run.
///
/// `REPORT_DATE` must be an ISO date (`YYYY-MM-DD`) when set; otherwise today's local date is used.
pub fn report_date_from_env() -> AppResult<NaiveDate> {
    match env::var("REPORT_DATE") {
        Ok(raw) => parse_report_date(&raw),
        Err(_) => Ok(chrono::Local::now().date_naive()),
    }
}

pub fn parse_report_date(raw: &str) -> AppResult<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Validation("report date is missing".to_string()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| AppError::Validation(format!("invalid report date '{}': {}", raw, e)))
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            records_path: PathBuf::from("data/borrow_records.json"),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("reports"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
