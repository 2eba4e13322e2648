//! Terminal display renderer
//!
//! Draws the formula line, the primary display, the keypad and the session
//! history. Rendering only reads the app state.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Widget},
    Frame,
};

use super::app::CalculatorApp;
use super::keypad::KeypadWidget;
use crate::core::format::is_sentinel;

/// Window title
pub const TITLE: &str = " Keypad Calculator ";

/// Key bindings shown in the help panel
pub const HELP_SHORTCUTS: &[(&str, &str)] = &[
    ("0-9 .", "Enter number"),
    ("+ - * /", "Operator"),
    ("Enter =", "Evaluate"),
    ("Esc c", "Clear"),
    ("Ctrl+L", "Clear all"),
    ("Ctrl+C", "Quit"),
    ("Mouse", "Press button"),
];

/// History entries shown at most
const HISTORY_ROWS: usize = 10;

/// Screen regions of the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    /// Formula line
    pub formula: Rect,
    /// Primary display
    pub display: Rect,
    /// Session history
    pub history: Rect,
    /// Keypad
    pub keypad: Rect,
    /// Help sidebar
    pub help: Rect,
}

impl UiLayout {
    /// Splits the terminal area into regions
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .margin(1)
            .constraints([
                Constraint::Min(24),
                Constraint::Length(34),
                Constraint::Length(22),
            ])
            .split(area);

        let main = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(columns[0]);

        Self {
            formula: main[0],
            display: main[1],
            history: main[2],
            keypad: columns[1],
            help: columns[2],
        }
    }
}

/// Renders the calculator UI to the frame
pub fn render(app: &CalculatorApp, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(CalculatorUI::new(app), area);
}

/// Calculator UI widget
#[derive(Debug)]
pub struct CalculatorUI<'a> {
    app: &'a CalculatorApp,
}

impl<'a> CalculatorUI<'a> {
    /// Creates a new calculator UI widget
    #[must_use]
    pub fn new(app: &'a CalculatorApp) -> Self {
        Self { app }
    }

    fn render_formula(&self, area: Rect, buf: &mut Buffer) {
        let view = self.app.view();
        Paragraph::new(Span::styled(
            view.formula_line,
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .title(" Formula ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(area, buf);
    }

    fn render_display(&self, area: Rect, buf: &mut Buffer) {
        let view = self.app.view();
        let style = if is_sentinel(&view.display) {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };

        Paragraph::new(Span::styled(view.display, style))
            .alignment(Alignment::Right)
            .block(
                Block::default()
                    .title(" Display ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            )
            .render(area, buf);
    }

    fn render_history(&self, area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = self
            .app
            .history()
            .iter_rev()
            .take(HISTORY_ROWS)
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(entry.expression.as_str(), Style::default().fg(Color::Gray)),
                    Span::raw("="),
                    Span::styled(entry.result.as_str(), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" History (newest first) ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .render(area, buf);
    }

    fn render_help(area: Rect, buf: &mut Buffer) {
        let items: Vec<ListItem> = HELP_SHORTCUTS
            .iter()
            .map(|(key, desc)| {
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{key:>7}"), Style::default().fg(Color::Yellow)),
                    Span::raw(" "),
                    Span::styled(*desc, Style::default().fg(Color::Gray)),
                ]))
            })
            .collect();

        List::new(items)
            .block(
                Block::default()
                    .title(" Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .render(area, buf);
    }
}

impl Widget for CalculatorUI<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .render(area, buf);

        let layout = UiLayout::new(area);
        self.render_formula(layout.formula, buf);
        self.render_display(layout.display, buf);
        self.render_history(layout.history, buf);
        KeypadWidget::new(self.app.keypad())
            .highlight(self.app.highlighted())
            .render(layout.keypad, buf);
        Self::render_help(layout.help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events_from_keys;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(100, 30)).unwrap()
    }

    fn app_with(keys: &str) -> CalculatorApp {
        let mut app = CalculatorApp::new();
        for event in events_from_keys(keys) {
            app.press(event);
        }
        app
    }

    fn screen(app: &CalculatorApp) -> String {
        let mut terminal = create_test_terminal();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    // ===== Layout tests =====

    #[test]
    fn test_layout_regions_disjoint() {
        let layout = UiLayout::new(Rect::new(0, 0, 100, 30));
        assert!(!layout.keypad.intersects(layout.display));
        assert!(!layout.keypad.intersects(layout.help));
        assert!(layout.formula.y < layout.display.y);
        assert!(layout.display.y < layout.history.y);
        assert_eq!(layout.keypad.width, 34);
    }

    // ===== Rendering tests =====

    #[test]
    fn test_render_initial() {
        let text = screen(&CalculatorApp::new());
        assert!(text.contains("Keypad Calculator"));
        assert!(text.contains("Formula"));
        assert!(text.contains("Display"));
        assert!(text.contains("AC"));
    }

    #[test]
    fn test_render_buttons_colored_by_kind() {
        let app = CalculatorApp::new();
        let mut terminal = create_test_terminal();
        terminal.draw(|frame| render(&app, frame)).unwrap();
        let buf = terminal.backend().buffer();

        let keypad_area = UiLayout::new(Rect::new(0, 0, 100, 30)).keypad;
        for button in app.keypad().buttons() {
            let rect = KeypadWidget::button_rect(app.keypad(), keypad_area, button).unwrap();
            let cell = &buf[(rect.x + rect.width / 2, rect.y + rect.height / 2)];
            assert_eq!(
                cell.bg,
                KeypadWidget::kind_style(button.kind).bg.unwrap(),
                "button {}",
                button.id
            );
        }
    }

    #[test]
    fn test_render_formula_and_display() {
        let text = screen(&app_with("12*-3"));
        assert!(text.contains("12*-3"));
    }

    #[test]
    fn test_render_result_and_history() {
        let text = screen(&app_with("1/4="));
        assert!(text.contains("1/4=0.25"));
        assert!(text.contains("0.25"));
    }

    #[test]
    fn test_render_sentinel() {
        let text = screen(&app_with("5/0="));
        assert!(text.contains("Infinity"));
    }

    #[test]
    fn test_render_history_newest_first() {
        let text = screen(&app_with("1+1=2+2="));
        let newest = text.find("2+2=4").unwrap();
        let oldest = text.find("1+1=2").unwrap();
        assert!(newest < oldest);
    }

    #[test]
    fn test_render_help() {
        let text = screen(&CalculatorApp::new());
        for (key, _) in HELP_SHORTCUTS {
            assert!(text.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_render_small_terminal() {
        let app = app_with("9");
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal.draw(|frame| render(&app, frame)).unwrap();
    }
}
