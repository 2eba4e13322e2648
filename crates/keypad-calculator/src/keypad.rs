//! On-screen keypad layout
//!
//! Seventeen buttons on a 4 column x 5 row grid. Clear and zero span two
//! columns, equals spans two rows:
//!
//! ```text
//! [   AC    ] [ / ] [ * ]
//! [ 7 ] [ 8 ] [ 9 ] [ - ]
//! [ 4 ] [ 5 ] [ 6 ] [ + ]
//! [ 1 ] [ 2 ] [ 3 ] [   ]
//! [    0    ] [ . ] [ = ]
//! ```
//!
//! The layout is presentation only: every button just produces the same
//! [`LogicalEvent`] as its keyboard equivalent.

use serde::{Deserialize, Serialize};

use crate::core::Operation;
use crate::input::LogicalEvent;

/// Visual category of a button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonKind {
    /// Digit
    Number,
    /// Decimal point
    Dot,
    /// Binary operator
    Operator,
    /// Equals
    Equals,
    /// Clear
    Utility,
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeypadButton {
    /// Stable element ID (`"seven"`, `"add"`, `"clear"`, ...)
    pub id: &'static str,
    /// Text shown on the button
    pub label: &'static str,
    /// Keyboard key bound to the button
    pub key: &'static str,
    /// Visual category
    pub kind: ButtonKind,
    /// Event produced when pressed
    pub event: LogicalEvent,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
    /// Rows covered
    pub row_span: usize,
    /// Columns covered
    pub col_span: usize,
}

impl KeypadButton {
    const fn new(
        id: &'static str,
        label: &'static str,
        key: &'static str,
        kind: ButtonKind,
        event: LogicalEvent,
        (row, col): (usize, usize),
    ) -> Self {
        Self {
            id,
            label,
            key,
            kind,
            event,
            row,
            col,
            row_span: 1,
            col_span: 1,
        }
    }

    const fn digit(id: &'static str, label: &'static str, d: u8, cell: (usize, usize)) -> Self {
        Self::new(id, label, label, ButtonKind::Number, LogicalEvent::Digit(d), cell)
    }

    const fn operator(id: &'static str, op: Operation, cell: (usize, usize)) -> Self {
        let symbol = op.symbol();
        Self::new(
            id,
            symbol,
            symbol,
            ButtonKind::Operator,
            LogicalEvent::Operator(op),
            cell,
        )
    }

    const fn spanning(mut self, row_span: usize, col_span: usize) -> Self {
        self.row_span = row_span;
        self.col_span = col_span;
        self
    }

    /// Returns true if the button covers grid cell (`row`, `col`)
    #[must_use]
    pub const fn covers(&self, row: usize, col: usize) -> bool {
        row >= self.row
            && row < self.row + self.row_span
            && col >= self.col
            && col < self.col + self.col_span
    }
}

/// The keypad button table
#[derive(Debug, Clone)]
pub struct Keypad {
    buttons: Vec<KeypadButton>,
    rows: usize,
    cols: usize,
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

impl Keypad {
    /// Creates the standard keypad
    #[must_use]
    pub fn new() -> Self {
        use ButtonKind::{Dot, Equals, Utility};

        let buttons = vec![
            // Row 0: AC / *
            KeypadButton::new("clear", "AC", "Escape", Utility, LogicalEvent::Clear, (0, 0))
                .spanning(1, 2),
            KeypadButton::operator("divide", Operation::Divide, (0, 2)),
            KeypadButton::operator("multiply", Operation::Multiply, (0, 3)),
            // Row 1: 7 8 9 -
            KeypadButton::digit("seven", "7", 7, (1, 0)),
            KeypadButton::digit("eight", "8", 8, (1, 1)),
            KeypadButton::digit("nine", "9", 9, (1, 2)),
            KeypadButton::operator("subtract", Operation::Subtract, (1, 3)),
            // Row 2: 4 5 6 +
            KeypadButton::digit("four", "4", 4, (2, 0)),
            KeypadButton::digit("five", "5", 5, (2, 1)),
            KeypadButton::digit("six", "6", 6, (2, 2)),
            KeypadButton::operator("add", Operation::Add, (2, 3)),
            // Row 3: 1 2 3 =
            KeypadButton::digit("one", "1", 1, (3, 0)),
            KeypadButton::digit("two", "2", 2, (3, 1)),
            KeypadButton::digit("three", "3", 3, (3, 2)),
            KeypadButton::new("equals", "=", "Enter", Equals, LogicalEvent::Equals, (3, 3))
                .spanning(2, 1),
            // Row 4: 0 .
            KeypadButton::digit("zero", "0", 0, (4, 0)).spanning(1, 2),
            KeypadButton::new("decimal", ".", ".", Dot, LogicalEvent::DecimalPoint, (4, 2)),
        ];

        Self {
            buttons,
            rows: 5,
            cols: 4,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns all buttons in layout order
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButton] {
        &self.buttons
    }

    /// Gets a button by index
    #[must_use]
    pub fn get_button(&self, index: usize) -> Option<&KeypadButton> {
        self.buttons.get(index)
    }

    /// Returns the index of the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn index_at(&self, row: usize, col: usize) -> Option<usize> {
        self.buttons.iter().position(|b| b.covers(row, col))
    }

    /// Gets the button covering grid cell (`row`, `col`)
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButton> {
        self.index_at(row, col).and_then(|i| self.buttons.get(i))
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButton> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Returns the index of the button producing `event`
    #[must_use]
    pub fn index_of_event(&self, event: LogicalEvent) -> Option<usize> {
        self.buttons.iter().position(|b| b.event == event)
    }

    /// Finds the button bound to a keyboard key
    ///
    /// Keys that are aliases of a button (`=` for equals, `c` for clear)
    /// resolve to that button too.
    #[must_use]
    pub fn find_button_by_key(&self, key: &str) -> Option<&KeypadButton> {
        let event = LogicalEvent::from_key(key)?;
        self.index_of_event(event).and_then(|i| self.buttons.get(i))
    }

    /// Presses the button with element ID `id`, returning its event
    #[must_use]
    pub fn press(&self, id: &str) -> Option<LogicalEvent> {
        self.find_button_by_id(id).map(|b| b.event)
    }
}
