//! Keypad Calculator
//!
//! A keypad plus two-line display calculator. The heart of the crate is the
//! [`Accumulator`](accumulator::Accumulator), a state machine that turns
//! digit, decimal point, operator, equals and clear events into a
//! well-formed formula, then evaluates it with `*`/`/` binding tighter than
//! `+`/`-` and rounds the result to 12 decimal places.
//!
//! Frontends only translate their input into [`LogicalEvent`](input::LogicalEvent)s
//! and draw the [`DisplayView`](accumulator::DisplayView) they get back:
//!
//! - the on-screen [`keypad`] table (17 buttons, shared by every frontend)
//! - a ratatui terminal UI (`tui` feature)
//! - headless key replay (`keypad-calc eval`)
//!
//! # Example
//!
//! ```rust
//! use keypad_calculator::prelude::*;
//!
//! let mut calc = Accumulator::new();
//! for event in events_from_keys("5*-2=") {
//!     calc.handle(event);
//! }
//! assert_eq!(calc.display(), "-10");
//! assert_eq!(calc.formula_line(), "5*-2=-10");
//!
//! // Continue from the result
//! calc.on_operator(Operation::Multiply);
//! calc.on_digit(3);
//! calc.on_equals();
//! assert_eq!(calc.display(), "-30");
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod accumulator;
pub mod commands;
pub mod config;
pub mod core;
pub mod driver;
pub mod error;
pub mod input;
pub mod keypad;
pub mod logging;
pub mod output;

#[cfg(feature = "tui")]
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::accumulator::{
        Accumulator, CalculatorState, DisplayView, InputKind, EMPTY_FORMULA_LINE,
    };
    pub use crate::config::{AppConfig, LogConfig, OutputFormat};
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::format::format_result;
    pub use crate::core::formula::{Formula, FormulaToken};
    pub use crate::core::history::{History, HistoryEntry};
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{CalcError, CalcResult, Operation};
    pub use crate::driver::{AccumulatorDriver, CalculatorDriver, HistoryItem, KeypadDriver};
    pub use crate::error::{AppError, AppResult};
    pub use crate::input::{events_from_keys, LogicalEvent};
    pub use crate::keypad::{ButtonKind, Keypad, KeypadButton};

    #[cfg(feature = "tui")]
    pub use crate::driver::TuiDriver;
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_prelude_imports() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3").unwrap(), 5.0);
        assert_eq!(format_result(0.1 + 0.2), "0.3");
    }

    #[test]
    fn test_parser_direct() {
        let ast = Parser::parse_str("1+2*3").unwrap();
        assert_eq!(Evaluator::new().evaluate(&ast), 7.0);
    }

    #[test]
    fn test_keypad_and_accumulator_together() {
        let keypad = Keypad::new();
        let mut calc = Accumulator::new();
        for id in ["seven", "divide", "two", "equals"] {
            calc.handle(keypad.press(id).unwrap());
        }
        assert_eq!(calc.display(), "3.5");
        assert_eq!(calc.history().last().unwrap().display(), "7/2=3.5");
    }

    #[test]
    fn test_error_handling() {
        let eval = Evaluator::new();
        assert!(matches!(
            eval.evaluate_str("1++"),
            Err(CalcError::UnexpectedEnd)
        ));
        assert!(matches!(
            eval.evaluate_str("2%3"),
            Err(CalcError::UnexpectedChar { ch: '%', offset: 1 })
        ));
        // The accumulator path never fails
        let mut calc = Accumulator::new();
        calc.on_operator(Operation::Multiply);
        calc.on_digit(5);
        calc.on_equals();
        assert_eq!(calc.display(), "NaN");
    }

    #[test]
    fn test_drivers_agree() {
        let keys = "12.5*-4=+0.25=";
        let mut a = AccumulatorDriver::new();
        let mut k = KeypadDriver::new();
        a.press_keys(keys);
        k.press_keys(keys);
        assert_eq!(a.display(), "-49.75");
        assert_eq!(a.display(), k.display());
        assert_eq!(a.formula_line(), k.formula_line());
    }
}
