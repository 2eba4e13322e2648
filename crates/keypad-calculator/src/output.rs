//! Headless key replay and result printing

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::accumulator::{Accumulator, CalculatorState, DisplayView};
use crate::config::{AppConfig, OutputFormat};
use crate::core::history::HistoryEntry;
use crate::error::AppResult;
use crate::input::events_from_keys;

/// Outcome of replaying a key sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalReport {
    /// Keys as given
    pub keys: String,
    /// What the display shows at the end
    pub view: DisplayView,
    /// Full accumulator state at the end
    pub state: CalculatorState,
    /// Evaluations performed, oldest first
    pub history: Vec<HistoryEntry>,
}

/// Replays `keys` on a fresh accumulator
#[must_use]
pub fn replay(keys: &str, config: &AppConfig) -> EvalReport {
    let mut accumulator = Accumulator::with_history(config.history());
    let mut accepted = 0usize;
    for event in events_from_keys(keys) {
        accumulator.handle(event);
        accepted += 1;
    }
    info!(keys, accepted, "replayed key sequence");

    EvalReport {
        keys: keys.to_string(),
        view: accumulator.view(),
        state: accumulator.snapshot(),
        history: accumulator.history().iter().cloned().collect(),
    }
}

/// Formats a report for printing
pub fn render(report: &EvalReport, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{}\n{}",
            report.view.formula_line, report.view.display
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
