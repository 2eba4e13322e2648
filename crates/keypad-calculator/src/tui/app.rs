//! TUI application state
//!
//! Wraps one [`Accumulator`] with the on-screen keypad. Every input path
//! (keyboard, mouse click) ends in [`CalculatorApp::press`].

use ratatui::layout::Rect;
use tracing::debug;

use super::input::KeyAction;
use super::keypad::KeypadWidget;
use crate::accumulator::{Accumulator, DisplayView};
use crate::core::history::History;
use crate::input::LogicalEvent;
use crate::keypad::Keypad;

/// Calculator application state
#[derive(Debug)]
pub struct CalculatorApp {
    accumulator: Accumulator,
    keypad: Keypad,
    /// Button matching the last accepted event
    highlighted: Option<usize>,
    should_quit: bool,
}

impl Default for CalculatorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorApp {
    /// Creates a new calculator app with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_history(History::new())
    }

    /// Creates a calculator app recording into `history`
    #[must_use]
    pub fn with_history(history: History) -> Self {
        Self {
            accumulator: Accumulator::with_history(history),
            keypad: Keypad::new(),
            highlighted: None,
            should_quit: false,
        }
    }

    /// Returns the accumulator
    #[must_use]
    pub fn accumulator(&self) -> &Accumulator {
        &self.accumulator
    }

    /// Returns the keypad
    #[must_use]
    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    /// Returns the index of the highlighted keypad button
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Returns what the display should show
    #[must_use]
    pub fn view(&self) -> DisplayView {
        self.accumulator.view()
    }

    /// Returns the session history
    #[must_use]
    pub fn history(&self) -> &History {
        self.accumulator.history()
    }

    /// Returns whether the app should quit
    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sets the quit flag
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Feeds an event to the accumulator and highlights its button
    pub fn press(&mut self, event: LogicalEvent) {
        self.accumulator.handle(event);
        self.highlighted = self.keypad.index_of_event(event);
    }

    /// Presses the keypad button at `index`
    pub fn press_button(&mut self, index: usize) {
        if let Some(event) = self.keypad.get_button(index).map(|b| b.event) {
            self.press(event);
        }
    }

    /// Handles a left click at terminal position (`x`, `y`)
    ///
    /// `keypad_area` is where the keypad widget was last drawn.
    pub fn click(&mut self, keypad_area: Rect, x: u16, y: u16) {
        match KeypadWidget::hit_test(&self.keypad, keypad_area, x, y) {
            Some(index) => self.press_button(index),
            None => debug!(x, y, "click outside keypad buttons"),
        }
    }

    /// Clears the calculator; history is kept
    pub fn clear(&mut self) {
        self.press(LogicalEvent::Clear);
    }

    /// Clears everything including history
    pub fn clear_all(&mut self) {
        self.accumulator.clear_all();
        self.highlighted = None;
    }

    /// Applies a key action
    pub fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Event(event) => self.press(event),
            KeyAction::ClearAll => self.clear_all(),
            KeyAction::Quit => self.quit(),
            KeyAction::None => {}
        }
    }
}
