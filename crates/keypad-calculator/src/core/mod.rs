//! Core arithmetic: operators, formula token log, parser, evaluator and
//! result formatting
//!
//! Nothing in here touches a terminal, a keyboard or the clock (except the
//! history timestamp), so it is usable from any frontend.

pub mod evaluator;
pub mod format;
pub mod formula;
pub mod history;
mod operations;
pub mod parser;

pub use operations::Operation;

use thiserror::Error;

/// Result type for expression parsing and evaluation
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors produced by the strict evaluator API
///
/// The accumulator never surfaces these: a malformed expression is turned
/// into the `NaN` sentinel instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Expression contains no tokens
    #[error("Empty expression")]
    EmptyExpression,
    /// Character outside the calculator alphabet
    #[error("Unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar {
        /// Offending character
        ch: char,
        /// Byte offset in the input
        offset: usize,
    },
    /// Literal that does not parse as a number
    #[error("Invalid number: '{0}'")]
    InvalidNumber(String),
    /// Token in a position the grammar does not allow
    #[error("Unexpected token: {0}")]
    UnexpectedToken(String),
    /// Input ended where an operand was required
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
}
