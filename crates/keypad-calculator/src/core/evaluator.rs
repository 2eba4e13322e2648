//! AST evaluator
//!
//! Evaluation never fails on arithmetic: division by zero and overflow
//! produce IEEE infinities/NaN. Only malformed input is an error, and the
//! lenient entry point used by the accumulator turns that into NaN as well.

use tracing::warn;

use crate::core::format::format_result;
use crate::core::parser::{AstNode, Parser};
use crate::core::CalcResult;

/// Evaluator for keypad expressions
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates an AST node
    #[must_use]
    pub fn evaluate(&self, node: &AstNode) -> f64 {
        match node {
            AstNode::Number(n) => *n,
            AstNode::Negate(inner) => -self.evaluate(inner),
            AstNode::BinaryOp { left, op, right } => {
                op.apply(self.evaluate(left), self.evaluate(right))
            }
        }
    }

    /// Evaluates a string expression
    ///
    /// Blank input evaluates to `0`; malformed input is an error.
    pub fn evaluate_str(&self, input: &str) -> CalcResult<f64> {
        if input.trim().is_empty() {
            return Ok(0.0);
        }
        let ast = Parser::parse_str(input)?;
        Ok(self.evaluate(&ast))
    }

    /// Evaluates a sanitized formula, mapping malformed input to NaN
    #[must_use]
    pub fn evaluate_formula(&self, expression: &str) -> f64 {
        self.evaluate_str(expression).unwrap_or_else(|err| {
            warn!(expression, error = %err, "malformed expression evaluates to NaN");
            f64::NAN
        })
    }

    /// Evaluates and formats a sanitized formula for the display
    #[must_use]
    pub fn evaluate_display(&self, expression: &str) -> String {
        format_result(self.evaluate_formula(expression))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CalcError, Operation};

    // ===== AST evaluation tests =====

    #[test]
    fn test_evaluate_number() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&AstNode::number(42.0)), 42.0);
    }

    #[test]
    fn test_evaluate_double_negative() {
        let eval = Evaluator::new();
        let ast = AstNode::negate(AstNode::negate(AstNode::number(5.0)));
        assert_eq!(eval.evaluate(&ast), 5.0);
    }

    #[test]
    fn test_evaluate_nested_binary() {
        let eval = Evaluator::new();
        // (2 + 3) * 4 can only be built directly, the grammar has no parens
        let ast = AstNode::binary(
            AstNode::binary(AstNode::number(2.0), Operation::Add, AstNode::number(3.0)),
            Operation::Multiply,
            AstNode::number(4.0),
        );
        assert_eq!(eval.evaluate(&ast), 20.0);
    }

    // ===== String evaluation tests =====

    #[test]
    fn test_evaluate_str_precedence() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("2+3*4"), Ok(14.0));
        assert_eq!(eval.evaluate_str("10-4/2"), Ok(8.0));
    }

    #[test]
    fn test_evaluate_str_left_associative() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("8/4/2"), Ok(1.0));
        assert_eq!(eval.evaluate_str("8-4-2"), Ok(2.0));
    }

    #[test]
    fn test_evaluate_str_unary_minus() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("5*-2"), Ok(-10.0));
        assert_eq!(eval.evaluate_str("-5+10"), Ok(5.0));
        assert_eq!(eval.evaluate_str("-10*-"), Err(CalcError::UnexpectedEnd));
    }

    #[test]
    fn test_evaluate_str_blank_is_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str(""), Ok(0.0));
        assert_eq!(eval.evaluate_str("   "), Ok(0.0));
    }

    #[test]
    fn test_evaluate_str_division_by_zero() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("5/0"), Ok(f64::INFINITY));
        assert_eq!(eval.evaluate_str("-5/0"), Ok(f64::NEG_INFINITY));
        assert!(eval.evaluate_str("0/0").unwrap().is_nan());
    }

    #[test]
    fn test_evaluate_str_sentinel_operands() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_str("Infinity-1"), Ok(f64::INFINITY));
        assert_eq!(eval.evaluate_str("-Infinity*2"), Ok(f64::NEG_INFINITY));
        assert!(eval.evaluate_str("NaN+1").unwrap().is_nan());
    }

    // ===== Lenient evaluation tests =====

    #[test]
    fn test_evaluate_formula_malformed_is_nan() {
        let eval = Evaluator::new();
        assert!(eval.evaluate_formula("*5").is_nan());
        assert!(eval.evaluate_formula("3+4=7").is_nan());
    }

    #[test]
    fn test_evaluate_display() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate_display("1/3"), "0.333333333333");
        assert_eq!(eval.evaluate_display("1/4"), "0.25");
        assert_eq!(eval.evaluate_display("2+3*4"), "14");
        assert_eq!(eval.evaluate_display("5/0"), "Infinity");
        assert_eq!(eval.evaluate_display("*"), "NaN");
        assert_eq!(eval.evaluate_display(""), "0");
    }
}
