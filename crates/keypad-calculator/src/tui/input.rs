//! Terminal key handling
//!
//! Printable keys go through the same adapter as every other host, so the
//! terminal accepts exactly the keys a browser keyboard would.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::LogicalEvent;

/// Actions that can be triggered by keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Feed a logical event to the accumulator
    Event(LogicalEvent),
    /// Clear everything including history
    ClearAll,
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    ///
    /// Key releases and repeats are ignored so a held key does not type
    /// twice on terminals that report them.
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        if kind != KeyEventKind::Press {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                KeyCode::Char('l') => KeyAction::ClearAll,
                _ => KeyAction::None,
            };
        }

        let event = match code {
            KeyCode::Char(c) => LogicalEvent::from_char(c),
            KeyCode::Enter => Some(LogicalEvent::Equals),
            KeyCode::Esc | KeyCode::Delete => Some(LogicalEvent::Clear),
            _ => None,
        };

        event.map_or(KeyAction::None, KeyAction::Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Operation;
    use crossterm::event::KeyEventState;

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    // ===== Character input tests =====

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for (d, c) in ('0'..='9').enumerate() {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::Event(LogicalEvent::Digit(d as u8))
            );
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for op in Operation::ALL {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(op.as_char()))),
                KeyAction::Event(LogicalEvent::Operator(op))
            );
        }
    }

    #[test]
    fn test_handle_decimal_and_equals() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('.'))),
            KeyAction::Event(LogicalEvent::DecimalPoint)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('='))),
            KeyAction::Event(LogicalEvent::Equals)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Event(LogicalEvent::Equals)
        );
    }

    #[test]
    fn test_handle_clear_keys() {
        let handler = InputHandler::new();
        for code in [KeyCode::Esc, KeyCode::Delete, KeyCode::Char('c'), KeyCode::Char('C')] {
            assert_eq!(
                handler.handle_key(key_event(code)),
                KeyAction::Event(LogicalEvent::Clear)
            );
        }
    }

    #[test]
    fn test_unmapped_keys_ignored() {
        let handler = InputHandler::new();
        for code in [
            KeyCode::Char('x'),
            KeyCode::Char('('),
            KeyCode::Char('^'),
            KeyCode::Backspace,
            KeyCode::Left,
            KeyCode::Tab,
            KeyCode::F(1),
        ] {
            assert_eq!(handler.handle_key(key_event(code)), KeyAction::None);
        }
    }

    // ===== Ctrl combination tests =====

    #[test]
    fn test_ctrl_quit() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_ctrl_clear_all() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('l'))),
            KeyAction::ClearAll
        );
    }

    #[test]
    fn test_ctrl_other_ignored() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('5'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_shift_operator_accepted() {
        let handler = InputHandler::new();
        let event = KeyEvent::new(KeyCode::Char('+'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key(event),
            KeyAction::Event(LogicalEvent::Operator(Operation::Add))
        );
    }

    // ===== Event kind tests =====

    #[test]
    fn test_key_release_ignored() {
        let handler = InputHandler::new();
        let event = KeyEvent {
            code: KeyCode::Char('7'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(handler.handle_key(event), KeyAction::None);
    }
}
