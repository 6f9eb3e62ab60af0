//! Render orchestration for the Hack or Snooze TUI

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, View};
use crate::form::Form;
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{
    HotkeyBarWidget, HotkeyContext, InputWidget, StatusBarWidget, StoryListWidget,
};

/// Overlay types
#[derive(Debug, Clone)]
pub enum Overlay {
    Help,
    Form(Form),
}

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);

    render_title_bar(frame, app, layout.title_area);
    render_story_list(frame, app, layout.list_area);
    frame.render_widget(
        StatusBarWidget::new(app.status_message(), &app.theme),
        layout.status_bar,
    );
    render_hotkey_bar(frame, app, layout.hotkey_bar);

    match app.overlay() {
        Some(Overlay::Help) => render_help_overlay(frame, app, area),
        Some(Overlay::Form(form)) => render_form_overlay(frame, app, form, area),
        None => {}
    }
}

/// Render the title bar: app name, list tabs, current user
fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        " Hack or Snooze ",
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for (key, view) in [('1', View::All), ('2', View::Favorites), ('3', View::Mine)] {
        let style = if view == app.view() {
            Style::default()
                .fg(app.theme.border_focused)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(format!("{key}:{}", view.title()), style));
    }

    spans.push(Span::raw(" | "));
    match app.state.current_user() {
        Some(user) => spans.push(Span::styled(user.username(), app.theme.user_style())),
        None => spans.push(Span::styled(
            "not logged in",
            Style::default().add_modifier(Modifier::DIM),
        )),
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_story_list(frame: &mut Frame, app: &App, area: Rect) {
    let user = app.state.current_user();
    let empty_message = match app.view() {
        View::All => "No stories yet. Press r to refresh.",
        View::Favorites => "No favorites added! Press f on a story to star it.",
        View::Mine => "No stories added by user yet! Press s to submit one.",
    };

    let widget = StoryListWidget::new(app.visible_stories(), &app.theme)
        .favorites(user.map(|u| &u.favorites))
        .selected(app.selected())
        .title(app.view().title())
        .empty_message(empty_message);

    frame.render_widget(widget, area);
}

fn render_hotkey_bar(frame: &mut Frame, app: &App, area: Rect) {
    let context = match app.overlay() {
        Some(Overlay::Help) => HotkeyContext::Help,
        Some(Overlay::Form(_)) => HotkeyContext::Form,
        None => HotkeyContext::List {
            view: app.view(),
            logged_in: app.state.is_logged_in(),
        },
    };
    frame.render_widget(HotkeyBarWidget::new(context, &app.theme), area);
}

/// Render a form as a popup of stacked input fields
fn render_form_overlay(frame: &mut Frame, app: &App, form: &Form, area: Rect) {
    let height = form.fields().len() as u16 * 3 + 2;
    let popup_area = centered_rect_fixed(50, height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(form.title())
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); form.fields().len()])
        .split(inner);

    for (index, (field, row)) in form.fields().iter().zip(rows.iter()).enumerate() {
        let widget = InputWidget::new(field.label, field.value(), &app.theme)
            .cursor_position(field.cursor_position())
            .active(index == form.focused())
            .secret(field.secret);
        frame.render_widget(widget, *row);
    }
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(52, 24, area);

    frame.render_widget(Clear, popup_area);

    let heading = Style::default().add_modifier(Modifier::UNDERLINED);
    let help_text = vec![
        Line::from(Span::styled(
            " Hack or Snooze - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Lists:", heading)),
        Line::from("  1 / 2 / 3      All stories / Favorites / Mine"),
        Line::from("  j/k or ↑/↓     Move selection"),
        Line::from("  g/G            Jump to top/bottom"),
        Line::from("  r              Refresh the feed"),
        Line::from(""),
        Line::from(Span::styled("Stories:", heading)),
        Line::from("  f              Star or unstar selected story"),
        Line::from("  s              Submit a new story"),
        Line::from("  d              Delete (My stories only)"),
        Line::from(""),
        Line::from(Span::styled("Account:", heading)),
        Line::from("  l / n          Log in / Sign up"),
        Line::from("  L              Log out"),
        Line::from(""),
        Line::from(Span::styled("Forms:", heading)),
        Line::from("  Tab / Shift+Tab  Next / previous field"),
        Line::from("  Enter            Submit    Esc  Cancel"),
        Line::from(""),
        Line::from(Span::styled(
            "q quits. Press Esc or ? to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hns_core::{AppState, Client, CredentialStore};
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let client = Client::new("http://127.0.0.1:1").unwrap();
        App::new(AppState::new(
            client,
            CredentialStore::at("/nonexistent/credentials.json"),
        ))
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_anonymous_screen() {
        let text = draw(&app());

        assert!(text.contains("Hack or Snooze"));
        assert!(text.contains("not logged in"));
        assert!(text.contains("No stories yet"));
        assert!(text.contains("l:login"));
    }

    #[test]
    fn test_login_form_popup() {
        let mut app = app();
        app.open_login();
        let form = app.form_mut().unwrap();
        form.type_char('a');
        form.next_field();
        form.type_char('p');

        let text = draw(&app);
        assert!(text.contains("Log in"));
        assert!(text.contains("Username"));
        assert!(text.contains("Tab:next field"));
    }

    #[test]
    fn test_help_popup() {
        let mut app = app();
        app.toggle_help();

        assert!(draw(&app).contains("Hack or Snooze - Help"));
    }
}
