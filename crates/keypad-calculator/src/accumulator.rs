//! Expression accumulator - the keypad input state machine
//!
//! Turns a stream of logical events into a well-formed formula, evaluates it
//! on demand and exposes the two strings a renderer shows: the formula line
//! and the primary display.
//!
//! Every handler is total. Keystrokes that make no sense in the current
//! state are ignored, so no sequence of events can produce an invalid state.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::evaluator::Evaluator;
use crate::core::formula::Formula;
use crate::core::history::History;
use crate::core::Operation;
use crate::input::LogicalEvent;

/// Shown on the formula line while the formula is empty
pub const EMPTY_FORMULA_LINE: &str = "\u{00A0}";

/// Kind of the most recently accepted event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputKind {
    /// Nothing accepted since construction or the last clear
    #[default]
    Init,
    /// A digit
    Number,
    /// A decimal point
    DecimalPoint,
    /// An operator (binary or unary minus)
    Operator,
    /// Equals
    EqualsResult,
}

/// The two strings a display renderer draws
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayView {
    /// Secondary formula/history line (a non-breaking space when empty)
    pub formula_line: String,
    /// Primary display value
    pub display: String,
}

/// Snapshot of the complete accumulator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Rendered formula (empty string when empty)
    pub formula: String,
    /// Operand currently being typed
    pub current: String,
    /// Primary display value
    pub display: String,
    /// Kind of the last accepted event
    pub last_input: InputKind,
    /// Whether the formula was just evaluated
    pub evaluated: bool,
}

impl CalculatorState {
    /// The state after construction or clear
    #[must_use]
    pub fn initial() -> Self {
        Self {
            formula: String::new(),
            current: "0".to_string(),
            display: "0".to_string(),
            last_input: InputKind::Init,
            evaluated: false,
        }
    }
}

/// Owns one calculator session's state
#[derive(Debug, Clone)]
pub struct Accumulator {
    formula: Formula,
    current: String,
    display: String,
    last_input: InputKind,
    evaluated: bool,
    evaluator: Evaluator,
    history: History,
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Accumulator {
    /// Creates an accumulator in the initial state
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    /// Creates an accumulator recording evaluations into `history`
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            formula: Formula::new(),
            current: "0".to_string(),
            display: "0".to_string(),
            last_input: InputKind::Init,
            evaluated: false,
            evaluator: Evaluator::new(),
            history,
        }
    }

    // ===== Observers =====

    /// Returns the formula token log
    #[must_use]
    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    /// Returns the rendered formula line (non-breaking space when empty)
    #[must_use]
    pub fn formula_line(&self) -> String {
        if self.formula.is_empty() {
            EMPTY_FORMULA_LINE.to_string()
        } else {
            self.formula.to_string()
        }
    }

    /// Returns the operand currently being typed
    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Returns the primary display value
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Returns the kind of the last accepted event
    #[must_use]
    pub fn last_input(&self) -> InputKind {
        self.last_input
    }

    /// Returns true right after an evaluation
    #[must_use]
    pub fn is_evaluated(&self) -> bool {
        self.evaluated
    }

    /// Returns the session history
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Returns what the renderer should draw
    #[must_use]
    pub fn view(&self) -> DisplayView {
        DisplayView {
            formula_line: self.formula_line(),
            display: self.display.clone(),
        }
    }

    /// Returns a snapshot of the whole state
    #[must_use]
    pub fn snapshot(&self) -> CalculatorState {
        CalculatorState {
            formula: self.formula.to_string(),
            current: self.current.clone(),
            display: self.display.clone(),
            last_input: self.last_input,
            evaluated: self.evaluated,
        }
    }

    // ===== Event handlers =====

    /// Dispatches a logical event to its handler
    pub fn handle(&mut self, event: LogicalEvent) {
        match event {
            LogicalEvent::Digit(d) => self.on_digit(d),
            LogicalEvent::DecimalPoint => self.on_decimal_point(),
            LogicalEvent::Operator(op) => self.on_operator(op),
            LogicalEvent::Equals => self.on_equals(),
            LogicalEvent::Clear => self.on_clear(),
        }
    }

    /// Resets the state; the session history is kept
    pub fn on_clear(&mut self) {
        self.formula.clear();
        self.current = "0".to_string();
        self.display = "0".to_string();
        self.last_input = InputKind::Init;
        self.evaluated = false;
        debug!("accumulator cleared");
    }

    /// Resets the state and forgets the session history
    pub fn clear_all(&mut self) {
        self.on_clear();
        self.history.clear();
    }

    /// Handles a digit key (0-9; anything else is ignored)
    pub fn on_digit(&mut self, digit: u8) {
        let Some(ch) = char::from_digit(u32::from(digit), 10) else {
            debug!(digit, "ignoring out-of-range digit");
            return;
        };

        if self.evaluated {
            self.start_fresh(&ch.to_string(), InputKind::Number);
            return;
        }

        if self.current == "0"
            && ch == '0'
            && matches!(
                self.last_input,
                InputKind::Number | InputKind::DecimalPoint | InputKind::Init
            )
        {
            trace!("suppressing redundant leading zero");
            return;
        }

        if matches!(self.last_input, InputKind::Operator | InputKind::Init) {
            self.current = ch.to_string();
            self.formula.push_operand(ch);
        } else if self.current == "0" {
            self.current = ch.to_string();
            if !self.formula.replace_lone_zero(ch) {
                debug!(formula = %self.formula, "no lone zero to replace");
            }
        } else {
            self.current.push(ch);
            self.formula.push_digit(ch);
        }

        self.display = self.current.clone();
        self.last_input = InputKind::Number;
        trace!(formula = %self.formula, current = %self.current, "digit accepted");
    }

    /// Handles the decimal point key
    pub fn on_decimal_point(&mut self) {
        if self.evaluated {
            self.start_fresh("0.", InputKind::DecimalPoint);
            return;
        }

        if matches!(self.last_input, InputKind::Operator | InputKind::Init) {
            self.formula.push_operand("0.");
            self.current = "0.".to_string();
        } else if self.current.contains('.') {
            trace!(current = %self.current, "operand already has a decimal point");
            return;
        } else {
            self.current.push('.');
            self.formula.push_decimal_point();
        }

        self.display = self.current.clone();
        self.last_input = InputKind::DecimalPoint;
        trace!(formula = %self.formula, "decimal point accepted");
    }

    /// Handles an operator key
    pub fn on_operator(&mut self, op: Operation) {
        if self.evaluated {
            // Continue from the result
            self.formula = Formula::from_operand(self.display.clone());
            self.formula.push_operator(op);
            self.display = op.symbol().to_string();
            self.evaluated = false;
            self.current = "0".to_string();
            self.last_input = InputKind::Operator;
            trace!(formula = %self.formula, "continuing from result");
            return;
        }

        self.current = "0".to_string();
        self.last_input = InputKind::Operator;

        if self.formula.is_empty() && op.is_minus() {
            self.formula.push_negate();
        } else if self.formula.ends_with_operator() {
            if op.is_minus() && !self.formula.ends_with_minus() {
                self.formula.push_negate();
            } else {
                self.formula.replace_trailing_operator(op);
            }
        } else {
            self.formula.push_operator(op);
        }

        self.display = op.symbol().to_string();
        trace!(formula = %self.formula, "operator accepted");
    }

    /// Evaluates the formula and shows the result
    ///
    /// An evaluated formula still carries its `=result` tail, so pressing
    /// equals again evaluates `2+3=5`, which is malformed and gives `NaN`.
    pub fn on_equals(&mut self) {
        let mut formula = self.formula.sanitized();
        let expression = formula.expression();
        let result = self.evaluator.evaluate_display(&expression);

        formula.set_result(result.clone());
        self.history.record(&expression, &result);
        debug!(%expression, %result, "formula evaluated");

        self.formula = formula;
        self.display = result.clone();
        self.current = result;
        self.evaluated = true;
        self.last_input = InputKind::EqualsResult;
    }

    fn start_fresh(&mut self, operand: &str, kind: InputKind) {
        self.formula = Formula::from_operand(operand);
        self.current = operand.to_string();
        self.display = operand.to_string();
        self.evaluated = false;
        self.last_input = kind;
        trace!(operand, "starting a new formula");
    }
}
