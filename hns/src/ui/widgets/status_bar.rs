//! Status bar and hotkey bar widgets

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::app::View;
use crate::ui::theme::HnsTheme;

/// One-line status message
pub struct StatusBarWidget<'a> {
    message: Option<&'a str>,
    theme: &'a HnsTheme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(message: Option<&'a str>, theme: &'a HnsTheme) -> Self {
        Self { message, theme }
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(message) = self.message else {
            return;
        };
        let line = Line::from(Span::styled(
            format!(" {message}"),
            self.theme.status_style(message),
        ));
        Paragraph::new(line).render(area, buf);
    }
}

/// What the hotkey bar should advertise
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyContext {
    List { view: View, logged_in: bool },
    Form,
    Help,
}

/// Hotkey bar widget
pub struct HotkeyBarWidget<'a> {
    context: HotkeyContext,
    theme: &'a HnsTheme,
}

impl<'a> HotkeyBarWidget<'a> {
    pub fn new(context: HotkeyContext, theme: &'a HnsTheme) -> Self {
        Self { context, theme }
    }

    fn hotkeys(&self) -> Vec<(&'static str, bool)> {
        match self.context {
            HotkeyContext::List {
                view,
                logged_in: true,
            } => {
                let mut keys = vec![
                    ("1/2/3:lists", true),
                    ("j/k:move", true),
                    ("f:favorite", true),
                ];
                if view == View::Mine {
                    keys.push(("d:delete", true));
                }
                keys.extend([
                    ("s:submit", true),
                    ("r:refresh", false),
                    ("L:logout", false),
                    ("?:help", false),
                    ("q:quit", false),
                ]);
                keys
            }
            HotkeyContext::List {
                logged_in: false, ..
            } => vec![
                ("j/k:move", true),
                ("l:login", true),
                ("n:signup", true),
                ("r:refresh", false),
                ("?:help", false),
                ("q:quit", false),
            ],
            HotkeyContext::Form => vec![
                ("Tab:next field", true),
                ("Enter:submit", true),
                ("Esc:cancel", false),
            ],
            HotkeyContext::Help => vec![("Esc:close", true)],
        }
    }
}

impl Widget for HotkeyBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hotkeys()
            .into_iter()
            .flat_map(|(text, primary)| {
                let style = if primary {
                    Style::default().fg(self.theme.foreground)
                } else {
                    Style::default().add_modifier(Modifier::DIM)
                };
                [Span::styled(text, style), Span::raw("  ")]
            })
            .collect();

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(context: HotkeyContext) -> Vec<&'static str> {
        let theme = HnsTheme::default();
        HotkeyBarWidget::new(context, &theme)
            .hotkeys()
            .into_iter()
            .map(|(text, _)| text)
            .collect()
    }

    #[test]
    fn test_delete_only_advertised_on_my_stories() {
        let mine = labels(HotkeyContext::List {
            view: View::Mine,
            logged_in: true,
        });
        let all = labels(HotkeyContext::List {
            view: View::All,
            logged_in: true,
        });

        assert!(mine.contains(&"d:delete"));
        assert!(!all.contains(&"d:delete"));
    }

    #[test]
    fn test_anonymous_hotkeys() {
        let keys = labels(HotkeyContext::List {
            view: View::All,
            logged_in: false,
        });

        assert!(keys.contains(&"l:login"));
        assert!(!keys.contains(&"f:favorite"));
    }
}
