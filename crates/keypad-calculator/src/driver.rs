//! Unified calculator drivers
//!
//! The behavioural checks below are written once against
//! [`CalculatorDriver`] and run against every way of operating the
//! calculator: the accumulator directly, the on-screen keypad, and the
//! terminal app.

use crate::accumulator::Accumulator;
use crate::core::history::History;
use crate::input::{events_from_keys, LogicalEvent};
use crate::keypad::Keypad;

/// Abstract driver for calculator interactions
///
/// # Example
///
/// ```rust
/// use keypad_calculator::driver::{AccumulatorDriver, CalculatorDriver};
///
/// let mut driver = AccumulatorDriver::new();
/// driver.press_keys("5*-2=");
/// assert_eq!(driver.display(), "-10");
/// assert_eq!(driver.formula_line(), "5*-2=-10");
/// ```
pub trait CalculatorDriver {
    /// Presses each key of `keys` in order (single-character key names)
    fn press_keys(&mut self, keys: &str);

    /// Gets the formula line
    fn formula_line(&self) -> String;

    /// Gets the primary display
    fn display(&self) -> String;

    /// Presses clear
    fn clear(&mut self);

    /// Gets history entries (newest first)
    fn history(&self) -> Vec<HistoryItem>;
}

/// A simplified history item for driver results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryItem {
    /// The expression that was evaluated
    pub expression: String,
    /// The formatted result
    pub result: String,
}

fn history_items(history: &History) -> Vec<HistoryItem> {
    history
        .iter_rev()
        .map(|entry| HistoryItem {
            expression: entry.expression.clone(),
            result: entry.result.clone(),
        })
        .collect()
}

/// Drives the accumulator through the key adapter
#[derive(Debug, Default)]
pub struct AccumulatorDriver {
    accumulator: Accumulator,
}

impl AccumulatorDriver {
    /// Creates a driver over a fresh accumulator
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the underlying accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }
}

impl CalculatorDriver for AccumulatorDriver {
    fn press_keys(&mut self, keys: &str) {
        for event in events_from_keys(keys) {
            self.accumulator.handle(event);
        }
    }

    fn formula_line(&self) -> String {
        self.accumulator.formula_line()
    }

    fn display(&self) -> String {
        self.accumulator.display().to_string()
    }

    fn clear(&mut self) {
        self.accumulator.on_clear();
    }

    fn history(&self) -> Vec<HistoryItem> {
        history_items(self.accumulator.history())
    }
}

/// Drives the accumulator by clicking keypad buttons
///
/// Each key is resolved to its button first, so a key without a button
/// is never delivered.
#[derive(Debug, Default)]
pub struct KeypadDriver {
    accumulator: Accumulator,
    keypad: Keypad,
    clicked: Vec<&'static str>,
}

impl KeypadDriver {
    /// Creates a driver over a fresh accumulator and keypad
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clicks the button with element ID `id`; unknown IDs are ignored
    pub fn click(&mut self, id: &str) {
        let Some(button) = self.keypad.find_button_by_id(id) else {
            return;
        };
        self.clicked.push(button.id);
        self.accumulator.handle(button.event);
    }

    /// Returns the IDs of the buttons clicked so far
    #[must_use]
    pub fn clicked(&self) -> &[&'static str] {
        &self.clicked
    }
}

impl CalculatorDriver for KeypadDriver {
    fn press_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            let id = self
                .keypad
                .find_button_by_key(ch.encode_utf8(&mut [0; 4]))
                .map(|b| b.id);
            if let Some(id) = id {
                self.click(id);
            }
        }
    }

    fn formula_line(&self) -> String {
        self.accumulator.formula_line()
    }

    fn display(&self) -> String {
        self.accumulator.display().to_string()
    }

    fn clear(&mut self) {
        self.click("clear");
    }

    fn history(&self) -> Vec<HistoryItem> {
        history_items(self.accumulator.history())
    }
}

/// TUI driver implementation
#[cfg(feature = "tui")]
pub mod tui_driver {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::{history_items, CalculatorDriver, HistoryItem};
    use crate::tui::{CalculatorApp, InputHandler};

    /// Drives the terminal app with synthetic key events
    #[derive(Debug, Default)]
    pub struct TuiDriver {
        app: CalculatorApp,
        input: InputHandler,
    }

    impl TuiDriver {
        /// Creates a new TUI driver
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Creates a TUI driver with an existing app
        #[must_use]
        pub fn with_app(app: CalculatorApp) -> Self {
            Self {
                app,
                input: InputHandler::new(),
            }
        }

        /// Returns a reference to the underlying app
        #[must_use]
        pub fn app(&self) -> &CalculatorApp {
            &self.app
        }

        /// Sends one key event through the input handler
        pub fn send_key(&mut self, event: KeyEvent) {
            let action = self.input.handle_key(event);
            self.app.apply(action);
        }
    }

    impl CalculatorDriver for TuiDriver {
        fn press_keys(&mut self, keys: &str) {
            for ch in keys.chars() {
                self.send_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
            }
        }

        fn formula_line(&self) -> String {
            self.app.view().formula_line
        }

        fn display(&self) -> String {
            self.app.view().display
        }

        fn clear(&mut self) {
            self.send_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        }

        fn history(&self) -> Vec<HistoryItem> {
            history_items(self.app.history())
        }
    }
}

#[cfg(feature = "tui")]
pub use tui_driver::TuiDriver;

// ===== Unified behaviour checks =====
// These work with ANY CalculatorDriver implementation

const EMPTY_LINE: &str = crate::accumulator::EMPTY_FORMULA_LINE;

/// Clear returns to the initial display from any state
pub fn verify_clear<D: CalculatorDriver>(driver: &mut D) {
    for keys in ["12+3", "5*-", "1.5=", "7/0=", "9=+"] {
        driver.press_keys(keys);
        driver.clear();
        assert_eq!(driver.display(), "0", "after {keys:?}");
        assert_eq!(driver.formula_line(), EMPTY_LINE, "after {keys:?}");
        driver.clear();
        assert_eq!(driver.display(), "0");
    }
}

/// Repeated zeros at the start are dropped
pub fn verify_leading_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("000");
    assert_eq!(driver.display(), "0");
    assert_eq!(driver.formula_line(), EMPTY_LINE);

    driver.press_keys("7");
    assert_eq!(driver.formula_line(), "7");
    driver.clear();

    driver.press_keys("3+007");
    assert_eq!(driver.formula_line(), "3+7");
    driver.clear();
}

/// An operand holds at most one decimal point
pub fn verify_single_decimal_point<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("1.5.2.");
    assert_eq!(driver.display(), "1.52");
    assert_eq!(driver.formula_line(), "1.52");
    driver.clear();

    driver.press_keys(".");
    assert_eq!(driver.display(), "0.");
    driver.clear();
}

/// A second operator replaces the first
pub fn verify_operator_substitution<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("3+*");
    assert_eq!(driver.formula_line(), "3*");
    assert_eq!(driver.display(), "*");

    driver.press_keys("-+");
    assert_eq!(driver.formula_line(), "3+");
    driver.clear();
}

/// Minus after an operator negates the next operand
pub fn verify_unary_minus<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("5*-2=");
    assert_eq!(driver.display(), "-10");
    assert_eq!(driver.formula_line(), "5*-2=-10");
    driver.clear();

    driver.press_keys("-4+6=");
    assert_eq!(driver.display(), "2");
    driver.clear();
}

/// An operator after a result continues from it
pub fn verify_chained_equals<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("2+3=*4=");
    assert_eq!(driver.display(), "20");
    assert_eq!(driver.formula_line(), "5*4=20");
    driver.clear();
}

/// `*` and `/` bind tighter than `+` and `-`
pub fn verify_precedence<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("2+3*4=");
    assert_eq!(driver.display(), "14");
    driver.clear();

    driver.press_keys("10-4/2=");
    assert_eq!(driver.display(), "8");
    driver.clear();
}

/// Results are rounded to 12 decimal places without trailing zeros
pub fn verify_rounding<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("1/3=");
    assert_eq!(driver.display(), "0.333333333333");
    driver.clear();

    driver.press_keys("1/4=");
    assert_eq!(driver.display(), "0.25");
    driver.clear();

    driver.press_keys("0.1+0.2=");
    assert_eq!(driver.display(), "0.3");
    driver.clear();
}

/// Trailing operators are dropped before evaluation
pub fn verify_trailing_operator<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("7+=");
    assert_eq!(driver.display(), "7");
    assert_eq!(driver.formula_line(), "7=7");
    driver.clear();
}

/// Division by zero shows a sentinel instead of failing
pub fn verify_division_by_zero<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("5/0=");
    assert_eq!(driver.display(), "Infinity");
    driver.press_keys("-1=");
    assert_eq!(driver.display(), "Infinity");
    driver.clear();
}

/// Each evaluation is recorded, newest first
pub fn verify_history<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    let before = driver.history().len();
    driver.press_keys("1+1=");
    driver.press_keys("2*3=");

    let history = driver.history();
    assert_eq!(history.len(), before + 2);
    assert_eq!(
        history[0],
        HistoryItem {
            expression: "2*3".into(),
            result: "6".into(),
        }
    );
    assert_eq!(history[1].expression, "1+1");
    driver.clear();
}

/// Keys outside the calculator alphabet change nothing
pub fn verify_ignored_keys<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press_keys("4x%^()");
    assert_eq!(driver.display(), "4");
    assert_eq!(driver.formula_line(), "4");
    driver.clear();
}

/// Complete verification suite
pub fn run_behavior_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_clear(driver);
    verify_leading_zero(driver);
    verify_single_decimal_point(driver);
    verify_operator_substitution(driver);
    verify_unary_minus(driver);
    verify_chained_equals(driver);
    verify_precedence(driver);
    verify_rounding(driver);
    verify_trailing_operator(driver);
    verify_division_by_zero(driver);
    verify_history(driver);
    verify_ignored_keys(driver);
}

/// Feeds a single logical event to any driver by its key name
pub fn press_event<D: CalculatorDriver>(driver: &mut D, event: LogicalEvent) {
    match event {
        LogicalEvent::Clear => driver.clear(),
        LogicalEvent::Equals => driver.press_keys("="),
        other => driver.press_keys(&other.key()),
    }
}
