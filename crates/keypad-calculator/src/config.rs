//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::core::history::History;
use crate::error::{AppError, AppResult};

/// How headless results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Formula line and display, one per line
    #[default]
    Text,
    /// JSON snapshot of the final state
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Filter directive (`warn`, `debug`, `keypad_calculator=trace`, ...)
    pub level: String,
    /// Log file; without one the TUI discards logs and `eval` logs to stderr
    pub file: Option<PathBuf>,
    /// Emit JSON lines instead of human-readable text
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            json: false,
        }
    }
}

impl LogConfig {
    /// Builds the filter; `RUST_LOG` wins over the configured level
    pub fn env_filter(&self) -> AppResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        self.level_filter()
    }

    /// Builds the filter from the configured level only
    pub fn level_filter(&self) -> AppResult<EnvFilter> {
        EnvFilter::try_new(&self.level)
            .map_err(|e| AppError::config(format!("invalid log level '{}': {e}", self.level)))
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Maximum number of history entries kept per session
    pub history_capacity: usize,
    /// Logging setup
    pub logging: LogConfig,
    /// Headless output format
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_capacity: History::DEFAULT_MAX_ENTRIES,
            logging: LogConfig::default(),
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set log level directive
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.logging.level = level.into();
        self
    }

    /// Set log file
    #[must_use]
    pub fn with_log_file(mut self, file: Option<PathBuf>) -> Self {
        self.logging.file = file;
        self
    }

    /// Set JSON logging
    #[must_use]
    pub const fn with_log_json(mut self, json: bool) -> Self {
        self.logging.json = json;
        self
    }

    /// Set output format
    #[must_use]
    pub const fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Checks the configuration before anything is started
    pub fn validate(&self) -> AppResult<()> {
        if self.history_capacity == 0 {
            return Err(AppError::config("history capacity must be at least 1"));
        }
        self.logging.level_filter().map(|_| ())
    }

    /// Creates an empty history sized by this configuration
    #[must_use]
    pub fn history(&self) -> History {
        History::with_capacity(self.history_capacity)
    }
}
