//! Host-independent input adapter
//!
//! Physical keys and keypad buttons are funnelled into the same five
//! logical events. Key names follow the browser `KeyboardEvent.key`
//! convention (`"7"`, `"+"`, `"Enter"`, `"Escape"`).

use serde::{Deserialize, Serialize};

use crate::core::Operation;

/// A logical calculator event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalEvent {
    /// Digit 0-9
    Digit(u8),
    /// Decimal point
    DecimalPoint,
    /// Binary operator (or unary minus, depending on state)
    Operator(Operation),
    /// Evaluate the formula
    Equals,
    /// Reset the accumulator
    Clear,
}

impl LogicalEvent {
    /// Maps a key name to an event; unmapped keys yield `None`
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "Enter" | "=" => Some(Self::Equals),
            "Escape" | "Esc" => Some(Self::Clear),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Self::from_char(ch),
                    _ => None,
                }
            }
        }
    }

    /// Maps a single typed character to an event
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::DecimalPoint),
            '=' | '\n' | '\r' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => Operation::from_char(ch).map(Self::Operator),
        }
    }

    /// Returns the key that produces this event
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "Enter".to_string(),
            Self::Clear => "Escape".to_string(),
        }
    }
}

/// Maps every character of `keys` to an event, skipping unmapped ones
pub fn events_from_keys(keys: &str) -> impl Iterator<Item = LogicalEvent> + '_ {
    keys.chars().filter_map(LogicalEvent::from_char)
}
