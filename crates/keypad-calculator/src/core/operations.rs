//! The four binary operators of the keypad
//!
//! Arithmetic follows IEEE 754: dividing by zero produces an infinity or NaN
//! instead of an error, so the display can show it as a sentinel.

use serde::{Deserialize, Serialize};

/// Type-safe operator enum - the keypad only ever produces these four
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
}

impl Operation {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the operator symbol as it appears in the formula
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    /// Returns the operator symbol as a character
    #[must_use]
    pub const fn as_char(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    /// Parses an operator character
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Returns the precedence level (higher = binds tighter)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Subtract => 1,
            Self::Multiply | Self::Divide => 2,
        }
    }

    /// Returns true for `-`, which doubles as the unary minus
    #[must_use]
    pub const fn is_minus(&self) -> bool {
        matches!(self, Self::Subtract)
    }

    /// Applies the operator to two operands
    #[must_use]
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- Symbol tests ---

    #[test]
    fn test_operation_symbols() {
        assert_eq!(Operation::Add.symbol(), "+");
        assert_eq!(Operation::Subtract.symbol(), "-");
        assert_eq!(Operation::Multiply.symbol(), "*");
        assert_eq!(Operation::Divide.symbol(), "/");
    }

    #[test]
    fn test_operation_char_mapping() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_char(op.as_char()), Some(op));
            assert_eq!(op.to_string(), op.symbol());
        }
        assert_eq!(Operation::from_char('%'), None);
        assert_eq!(Operation::from_char('^'), None);
    }

    #[test]
    fn test_operation_precedence() {
        assert_eq!(Operation::Add.precedence(), Operation::Subtract.precedence());
        assert_eq!(
            Operation::Multiply.precedence(),
            Operation::Divide.precedence()
        );
        assert!(Operation::Multiply.precedence() > Operation::Add.precedence());
    }

    #[test]
    fn test_operation_is_minus() {
        assert!(Operation::Subtract.is_minus());
        assert!(!Operation::Add.is_minus());
    }

    // --- Arithmetic tests ---

    #[test]
    fn test_apply_basic() {
        assert_eq!(Operation::Add.apply(2.0, 3.0), 5.0);
        assert_eq!(Operation::Subtract.apply(2.0, 3.0), -1.0);
        assert_eq!(Operation::Multiply.apply(4.0, 3.0), 12.0);
        assert_eq!(Operation::Divide.apply(1.0, 4.0), 0.25);
    }

    #[test]
    fn test_divide_by_zero_is_infinite() {
        assert_eq!(Operation::Divide.apply(5.0, 0.0), f64::INFINITY);
        assert_eq!(Operation::Divide.apply(-5.0, 0.0), f64::NEG_INFINITY);
        assert!(Operation::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn test_overflow_is_infinite() {
        assert!(Operation::Multiply.apply(f64::MAX, 2.0).is_infinite());
    }

    proptest! {
        #[test]
        fn prop_add_commutative(a in -1e6f64..1e6, b in -1e6f64..1e6) {
            prop_assert_eq!(Operation::Add.apply(a, b), Operation::Add.apply(b, a));
        }

        #[test]
        fn prop_subtract_self_is_zero(a in -1e6f64..1e6) {
            prop_assert_eq!(Operation::Subtract.apply(a, a), 0.0);
        }
    }
}
