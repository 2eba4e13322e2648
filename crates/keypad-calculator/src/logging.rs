//! Tracing subscriber setup for the binary
//!
//! The terminal UI owns the screen, so in TUI mode logs go to the configured
//! file or nowhere. Headless commands log to stderr unless a file is given.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LogConfig;
use crate::error::{AppError, AppResult};

/// Where log lines go when no file is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard error
    Stderr,
    /// Dropped
    Discard,
}

/// Opens the writer for `config`
pub fn make_writer(config: &LogConfig, fallback: LogTarget) -> AppResult<BoxMakeWriter> {
    if let Some(path) = &config.file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        return Ok(BoxMakeWriter::new(Mutex::new(file)));
    }
    Ok(match fallback {
        LogTarget::Stderr => BoxMakeWriter::new(io::stderr),
        LogTarget::Discard => BoxMakeWriter::new(io::sink),
    })
}

/// Installs the global subscriber
pub fn init(config: &LogConfig, fallback: LogTarget) -> AppResult<()> {
    let filter = config.env_filter()?;
    let ansi = config.file.is_none() && fallback == LogTarget::Stderr;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(make_writer(config, fallback)?)
        .with_ansi(ansi)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| AppError::logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("keypad-calc-{}-{name}.log", std::process::id()))
    }

    #[test]
    fn test_make_writer_fallbacks() {
        let config = LogConfig::default();
        assert!(make_writer(&config, LogTarget::Stderr).is_ok());
        assert!(make_writer(&config, LogTarget::Discard).is_ok());
    }

    #[test]
    fn test_make_writer_creates_file() {
        let path = temp_log("writer");
        let config = LogConfig {
            file: Some(path.clone()),
            ..LogConfig::default()
        };
        assert!(make_writer(&config, LogTarget::Discard).is_ok());
        assert!(path.exists());
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_make_writer_bad_path() {
        let config = LogConfig {
            file: Some(PathBuf::from("/nonexistent-dir/keypad/calc.log")),
            ..LogConfig::default()
        };
        assert!(matches!(
            make_writer(&config, LogTarget::Stderr),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn test_level_filter_rejects_bad_level() {
        let config = LogConfig {
            level: "calc=[".to_string(),
            ..LogConfig::default()
        };
        assert!(config.level_filter().is_err());
    }
}
