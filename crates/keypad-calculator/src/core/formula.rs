//! Formula token log
//!
//! The formula is kept as a sequence of tokens rather than raw text so the
//! "strip trailing operator" and "replace trailing operator" edits are exact
//! token operations. The string shown on the history line is derived from
//! the tokens on demand.

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// One entry of the formula log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaToken {
    /// Operand text as typed (or a carried-over result such as `-10`)
    Operand(String),
    /// Binary operator
    Operator(Operation),
    /// Unary minus typed after an operator or at the start
    Negate,
    /// An earlier `=result` tail kept when equals is pressed again
    Result(String),
}

impl FormulaToken {
    /// Returns true for operators and unary minus
    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::Operator(_) | Self::Negate)
    }

    /// Returns true if the token renders as `-`
    #[must_use]
    pub const fn is_minus(&self) -> bool {
        matches!(self, Self::Negate | Self::Operator(Operation::Subtract))
    }

    fn write_to(&self, out: &mut String) {
        match self {
            Self::Operand(text) => out.push_str(text),
            Self::Operator(op) => out.push_str(op.symbol()),
            Self::Negate => out.push('-'),
            Self::Result(text) => {
                out.push('=');
                out.push_str(text);
            }
        }
    }
}

/// The accumulated expression plus the `=result` tail once evaluated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formula {
    tokens: Vec<FormulaToken>,
    result: Option<String>,
}

impl Formula {
    /// Creates an empty formula
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a formula holding a single operand
    #[must_use]
    pub fn from_operand(text: impl Into<String>) -> Self {
        Self {
            tokens: vec![FormulaToken::Operand(text.into())],
            result: None,
        }
    }

    /// Returns true if there are no tokens and no result
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.result.is_none()
    }

    /// Returns the token log
    #[must_use]
    pub fn tokens(&self) -> &[FormulaToken] {
        &self.tokens
    }

    /// Returns the `=result` tail, if the formula was evaluated
    #[must_use]
    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    /// Removes every token and the result
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.result = None;
    }

    /// Renders the expression part (without `=result`)
    #[must_use]
    pub fn expression(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            token.write_to(&mut out);
        }
        out
    }

    /// Starts a new operand
    pub fn push_operand(&mut self, text: impl Into<String>) {
        self.tokens.push(FormulaToken::Operand(text.into()));
    }

    /// Appends a digit to the trailing operand, starting one if needed
    pub fn push_digit(&mut self, digit: char) {
        match self.tokens.last_mut() {
            Some(FormulaToken::Operand(text)) => text.push(digit),
            _ => self.push_operand(digit.to_string()),
        }
    }

    /// Appends a decimal point to the trailing operand, starting `0.` if needed
    pub fn push_decimal_point(&mut self) {
        match self.tokens.last_mut() {
            Some(FormulaToken::Operand(text)) => text.push('.'),
            _ => self.push_operand("0."),
        }
    }

    /// Replaces a trailing operand that is exactly `0` with `digit`
    ///
    /// Returns false (and leaves the formula untouched) when the formula does
    /// not end in a lone zero.
    pub fn replace_lone_zero(&mut self, digit: char) -> bool {
        match self.tokens.last_mut() {
            Some(FormulaToken::Operand(text)) if text == "0" => {
                *text = digit.to_string();
                true
            }
            _ => false,
        }
    }

    /// Appends a binary operator
    pub fn push_operator(&mut self, op: Operation) {
        self.tokens.push(FormulaToken::Operator(op));
    }

    /// Appends a unary minus
    pub fn push_negate(&mut self) {
        self.tokens.push(FormulaToken::Negate);
    }

    /// Returns true if the last token is an operator or unary minus
    #[must_use]
    pub fn ends_with_operator(&self) -> bool {
        self.tokens.last().is_some_and(FormulaToken::is_operator)
    }

    /// Returns true if the last token renders as `-`
    #[must_use]
    pub fn ends_with_minus(&self) -> bool {
        self.tokens.last().is_some_and(FormulaToken::is_minus)
    }

    /// Removes one trailing operator group
    ///
    /// A group is a binary operator optionally followed by a unary minus
    /// (`*-`), or a lone trailing operator. Returns the number of tokens
    /// removed.
    pub fn pop_trailing_operator(&mut self) -> usize {
        if !self.ends_with_operator() {
            return 0;
        }

        let len = self.tokens.len();
        let group = match self.tokens.as_slice() {
            [.., FormulaToken::Operator(_), FormulaToken::Negate] => 2,
            _ => 1,
        };
        self.tokens.truncate(len - group);
        group
    }

    /// Replaces the trailing operator group with `op`
    pub fn replace_trailing_operator(&mut self, op: Operation) {
        self.pop_trailing_operator();
        self.push_operator(op);
    }

    /// Returns a copy with every trailing operator group stripped
    ///
    /// An `=result` tail becomes part of the copy's expression, so an
    /// evaluated formula sanitizes to e.g. `2+3=5`.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut tokens = self.tokens.clone();
        if let Some(result) = &self.result {
            tokens.push(FormulaToken::Result(result.clone()));
        }
        let mut clean = Self {
            tokens,
            result: None,
        };
        while clean.pop_trailing_operator() > 0 {}
        clean
    }

    /// Records the evaluation result as the `=result` tail
    pub fn set_result(&mut self, result: impl Into<String>) {
        self.result = Some(result.into());
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.expression())?;
        if let Some(result) = &self.result {
            write!(f, "={result}")?;
        }
        Ok(())
    }
}
