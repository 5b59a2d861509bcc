//! Session configuration
//!
//! ## Configuration Sources
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values, and CLI flags
//! take precedence over both.
//!
//! ## Keys
//! - `ORGCHART_DATA_DIR`: directory of the file repository (default `./data`)
//! - `ORGCHART_REMOTE_URL`: base URL of the HTTP repository and contact service
//! - `ORGCHART_HISTORY_LIMIT`: maximum number of kept snapshots
//! - `ORGCHART_LOG_LEVEL`: trace, debug, info, warn or error (default `info`)
//! - `ORGCHART_CHART_NAME`: chart name template, `{company}` is substituted

use std::path::PathBuf;

use crate::error::{HierarchyError, HierarchyResult};
use crate::services::remote_repository::DEFAULT_CHART_NAME_TEMPLATE;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub data_dir: PathBuf,
    pub remote_url: Option<String>,
    pub history_limit: Option<usize>,
    pub log_level: String,
    pub chart_name_template: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            remote_url: None,
            history_limit: None,
            log_level: "info".to_string(),
            chart_name_template: DEFAULT_CHART_NAME_TEMPLATE.to_string(),
        }
    }
}

impl SessionConfig {
    /// Load from `.env` and the process environment
    pub fn from_env() -> HierarchyResult<Self> {
        // Missing .env is fine; dotenvy never overrides variables already set
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> HierarchyResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let value = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(dir) = value("ORGCHART_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.remote_url = value("ORGCHART_REMOTE_URL");
        if let Some(limit) = value("ORGCHART_HISTORY_LIMIT") {
            config.history_limit = Some(parse_history_limit(&limit)?);
        }
        if let Some(level) = value("ORGCHART_LOG_LEVEL") {
            config = config.with_log_level(level)?;
        }
        if let Some(template) = value("ORGCHART_CHART_NAME") {
            config.chart_name_template = template;
        }
        Ok(config)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_remote_url(mut self, remote_url: impl Into<String>) -> Self {
        self.remote_url = Some(remote_url.into());
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> HierarchyResult<Self> {
        let level = level.into().to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(HierarchyError::ConfigurationError {
                field: "ORGCHART_LOG_LEVEL".to_string(),
                message: format!("unknown level '{level}', expected one of {}", LOG_LEVELS.join(", ")),
            });
        }
        self.log_level = level;
        Ok(self)
    }

    /// Chart name for a company, from the configured template
    pub fn chart_name(&self, company: &str) -> String {
        self.chart_name_template.replace("{company}", company)
    }
}

fn parse_history_limit(raw: &str) -> HierarchyResult<usize> {
    match raw.parse::<usize>() {
        Ok(limit) if limit > 0 => Ok(limit),
        _ => Err(HierarchyError::ConfigurationError {
            field: "ORGCHART_HISTORY_LIMIT".to_string(),
            message: format!("expected a positive integer, got '{raw}'"),
        }),
    }
}
