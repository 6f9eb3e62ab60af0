//! Color theme and styling for the Hack or Snooze TUI

use ratatui::style::{Color, Modifier, Style};

/// UI color theme
#[derive(Debug, Clone)]
pub struct HnsTheme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,
    pub selected_bg: Color,

    // Story colors
    pub title_text: Color,
    pub host_text: Color,
    pub meta_text: Color,
    pub favorite: Color,

    // Status colors
    pub user_text: Color,
    pub error_text: Color,
}

impl Default for HnsTheme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selected_bg: Color::DarkGray,

            title_text: Color::White,
            host_text: Color::Cyan,
            meta_text: Color::Gray,
            favorite: Color::Yellow,

            user_text: Color::LightGreen,
            error_text: Color::LightRed,
        }
    }
}

impl HnsTheme {
    /// Story title
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title_text)
            .add_modifier(Modifier::BOLD)
    }

    /// `(host)` after the title
    pub fn host_style(&self) -> Style {
        Style::default().fg(self.host_text)
    }

    /// Author and poster line
    pub fn meta_style(&self) -> Style {
        Style::default()
            .fg(self.meta_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn star_style(&self, is_favorite: bool) -> Style {
        if is_favorite {
            Style::default()
                .fg(self.favorite)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.meta_text)
        }
    }

    /// Highlight for the selected story
    pub fn selected_style(&self) -> Style {
        Style::default().bg(self.selected_bg)
    }

    /// Status line; errors stand out
    pub fn status_style(&self, message: &str) -> Style {
        if message.starts_with("Error") {
            Style::default()
                .fg(self.error_text)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.foreground)
        }
    }

    pub fn user_style(&self) -> Style {
        Style::default()
            .fg(self.user_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Text being typed into a form field
    pub fn input_style(&self) -> Style {
        Style::default().fg(self.border_focused)
    }
}
