//! Single-line input field widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme::HnsTheme;

/// A labelled, bordered text field
pub struct InputWidget<'a> {
    label: &'a str,
    content: &'a str,
    cursor_position: usize,
    theme: &'a HnsTheme,
    is_active: bool,
    is_secret: bool,
}

impl<'a> InputWidget<'a> {
    pub fn new(label: &'a str, content: &'a str, theme: &'a HnsTheme) -> Self {
        Self {
            label,
            content,
            cursor_position: content.chars().count(),
            theme,
            is_active: false,
            is_secret: false,
        }
    }

    pub fn cursor_position(mut self, pos: usize) -> Self {
        self.cursor_position = pos;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.is_active = active;
        self
    }

    pub fn secret(mut self, secret: bool) -> Self {
        self.is_secret = secret;
        self
    }
}

impl Widget for InputWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.label))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(self.is_active));

        let inner = block.inner(area);
        block.render(area, buf);

        let display: String = if self.is_secret {
            "*".repeat(self.content.chars().count())
        } else {
            self.content.to_string()
        };

        let line = if !self.is_active {
            Line::from(Span::raw(display))
        } else {
            // Use character-based slicing for unicode safety
            let before_cursor: String = display.chars().take(self.cursor_position).collect();
            let at_cursor = display
                .chars()
                .nth(self.cursor_position)
                .map(|c| c.to_string())
                .unwrap_or_else(|| " ".to_string());
            let after_cursor: String = display.chars().skip(self.cursor_position + 1).collect();

            Line::from(vec![
                Span::raw(before_cursor),
                Span::styled(
                    at_cursor,
                    self.theme
                        .input_style()
                        .add_modifier(Modifier::UNDERLINED | Modifier::BOLD),
                ),
                Span::raw(after_cursor),
            ])
        };

        Paragraph::new(line)
            .style(Style::default().fg(self.theme.foreground))
            .render(inner, buf);
    }
}
