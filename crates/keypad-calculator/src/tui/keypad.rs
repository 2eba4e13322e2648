//! Keypad widget
//!
//! Draws the shared [`Keypad`] table as a grid of boxed buttons and maps
//! mouse positions back to buttons. Spanning buttons (`AC`, `0`, `=`) get
//! one box covering all their cells.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::keypad::{ButtonKind, Keypad, KeypadButton};

/// Keypad widget for rendering
#[derive(Debug)]
pub struct KeypadWidget<'a> {
    keypad: &'a Keypad,
    highlighted: Option<usize>,
}

impl<'a> KeypadWidget<'a> {
    /// Creates a new keypad widget
    #[must_use]
    pub fn new(keypad: &'a Keypad) -> Self {
        Self {
            keypad,
            highlighted: None,
        }
    }

    /// Highlights the button at `index`
    #[must_use]
    pub fn highlight(mut self, index: Option<usize>) -> Self {
        self.highlighted = index;
        self
    }

    /// Area inside the outer border
    fn inner(area: Rect) -> Rect {
        Rect {
            x: area.x.saturating_add(1),
            y: area.y.saturating_add(1),
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        }
    }

    /// Size of one grid cell, or `None` when the area is too small
    fn cell_size(keypad: &Keypad, inner: Rect) -> Option<(u16, u16)> {
        let (rows, cols) = keypad.dimensions();
        let cell_w = inner.width / u16::try_from(cols).ok()?;
        let cell_h = inner.height / u16::try_from(rows).ok()?;
        (cell_w > 0 && cell_h > 0).then_some((cell_w, cell_h))
    }

    /// Screen rectangle of a button, spans included
    #[must_use]
    pub fn button_rect(keypad: &Keypad, area: Rect, button: &KeypadButton) -> Option<Rect> {
        let inner = Self::inner(area);
        let (cell_w, cell_h) = Self::cell_size(keypad, inner)?;
        let grid = |n: usize| u16::try_from(n).ok();
        Some(Rect {
            x: inner.x + grid(button.col)? * cell_w,
            y: inner.y + grid(button.row)? * cell_h,
            width: grid(button.col_span)? * cell_w,
            height: grid(button.row_span)? * cell_h,
        })
    }

    /// Converts a click position to a button index
    #[must_use]
    pub fn hit_test(keypad: &Keypad, area: Rect, x: u16, y: u16) -> Option<usize> {
        let inner = Self::inner(area);
        if x < inner.x || y < inner.y {
            return None;
        }
        let (cell_w, cell_h) = Self::cell_size(keypad, inner)?;
        let col = usize::from((x - inner.x) / cell_w);
        let row = usize::from((y - inner.y) / cell_h);
        keypad.index_at(row, col)
    }

    /// Colors for a button kind
    ///
    /// Digits and the decimal point share one palette; operators, utility
    /// keys and equals each get their own.
    #[must_use]
    pub fn kind_style(kind: ButtonKind) -> Style {
        match kind {
            ButtonKind::Number | ButtonKind::Dot => {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            }
            ButtonKind::Operator => Style::default().fg(Color::LightCyan).bg(Color::Blue),
            ButtonKind::Utility => Style::default().fg(Color::LightBlue).bg(Color::Black),
            ButtonKind::Equals => Style::default()
                .fg(Color::White)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn button_style(button: &KeypadButton, highlighted: bool) -> Style {
        if highlighted {
            return Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD);
        }
        Self::kind_style(button.kind)
    }
}

impl Widget for KeypadWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::default()
            .title(" Keypad ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .render(area, buf);

        for (index, button) in self.keypad.buttons().iter().enumerate() {
            let Some(rect) = Self::button_rect(self.keypad, area, button) else {
                return;
            };
            let style = Self::button_style(button, self.highlighted == Some(index));

            // Boxed buttons need three rows; fall back to bare labels
            if rect.height >= 3 && rect.width >= 3 {
                let inner_height = rect.height - 2;
                let padding = "\n".repeat(usize::from(inner_height.saturating_sub(1) / 2));
                Paragraph::new(format!("{padding}{}", button.label))
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(style),
                    )
                    .render(rect, buf);
            } else {
                Paragraph::new(button.label)
                    .alignment(Alignment::Center)
                    .style(style)
                    .render(rect, buf);
            }
        }
    }
}
