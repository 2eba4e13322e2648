//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AppConfig, OutputFormat};
use crate::core::history::History;

/// Keypad calculator: terminal keypad and headless key replay
#[derive(Parser, Debug)]
#[command(name = "keypad-calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter directive (RUST_LOG takes precedence)
    #[arg(long, env = "KEYPAD_CALC_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Append logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Maximum number of history entries kept
    #[arg(
        long = "history",
        env = "KEYPAD_CALC_HISTORY",
        default_value_t = History::DEFAULT_MAX_ENTRIES,
        global = true
    )]
    pub history_capacity: usize,

    /// Subcommand to run (defaults to the terminal UI)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a key sequence and print the display
    Eval(EvalArgs),

    /// Start the interactive terminal keypad
    #[cfg(feature = "tui")]
    Tui,
}

/// Arguments for the eval command
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Keys to press, one character each (`=` evaluates, `c` clears)
    #[arg(allow_hyphen_values = true)]
    pub keys: String,

    /// Print a JSON snapshot instead of the two display lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Builds the application configuration from the parsed arguments
    #[must_use]
    pub fn config(&self) -> AppConfig {
        let output = match &self.command {
            Some(Commands::Eval(args)) if args.json => OutputFormat::Json,
            _ => OutputFormat::Text,
        };

        AppConfig::new()
            .with_history_capacity(self.history_capacity)
            .with_log_level(self.log_level.clone())
            .with_log_file(self.log_file.clone())
            .with_log_json(self.log_json)
            .with_output(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["keypad-calc", "eval", "2+3*4="]).unwrap();
        match &cli.command {
            Some(Commands::Eval(args)) => {
                assert_eq!(args.keys, "2+3*4=");
                assert!(!args.json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.config().output, OutputFormat::Text);
    }

    #[test]
    fn test_parse_eval_leading_minus() {
        let cli = Cli::try_parse_from(["keypad-calc", "eval", "-5*2="]).unwrap();
        assert!(matches!(&cli.command, Some(Commands::Eval(args)) if args.keys == "-5*2="));
    }

    #[test]
    fn test_parse_eval_json() {
        let cli = Cli::try_parse_from(["keypad-calc", "eval", "--json", "1/4="]).unwrap();
        assert_eq!(cli.config().output, OutputFormat::Json);
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "keypad-calc",
            "--log-level",
            "debug",
            "--log-json",
            "--history",
            "7",
            "eval",
            "1",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.history_capacity, 7);
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["keypad-calc"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[cfg(feature = "tui")]
    #[test]
    fn test_parse_tui() {
        let cli = Cli::try_parse_from(["keypad-calc", "tui"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Tui)));
    }
}
