//! Event handling for the Hack or Snooze TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::app::{App, PendingAction, View};
use crate::ui::Overlay;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
    /// A network action was queued
    ProcessAction,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    let result = match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    };

    if result != EventResult::Quit && app.has_pending_action() {
        EventResult::ProcessAction
    } else {
        result
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    if app.has_overlay() {
        return EventResult::Continue;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    // Ctrl+C always quits
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.overlay() {
        Some(Overlay::Help) => handle_help_key(app, key),
        Some(Overlay::Form(_)) => handle_form_key(app, key),
        None => handle_list_key(app, key),
    }
}

/// Keys while a story list is showing
fn handle_list_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => EventResult::Quit,

        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }

        // Views
        KeyCode::Char('1') => {
            app.set_view(View::All);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('2') => {
            app.set_view(View::Favorites);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('3') => {
            app.set_view(View::Mine);
            EventResult::NeedsRedraw
        }

        // Navigation
        KeyCode::Char('j') | KeyCode::Down => {
            app.select_next();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.select_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') | KeyCode::Home => {
            app.select_first();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') | KeyCode::End => {
            app.select_last();
            EventResult::NeedsRedraw
        }

        // Story actions
        KeyCode::Char('f') => {
            app.toggle_selected_favorite();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') => {
            app.delete_selected();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('s') => {
            app.open_submit();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('r') => {
            app.queue_action(PendingAction::Refresh);
            EventResult::NeedsRedraw
        }

        // Account
        KeyCode::Char('l') => {
            app.open_login();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('n') => {
            app.open_signup();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('L') => {
            app.logout();
            EventResult::NeedsRedraw
        }

        _ => EventResult::Continue,
    }
}

fn handle_help_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys while a form is open. Every printable key is text.
fn handle_form_key(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.close_overlay();
            app.clear_status();
            return EventResult::NeedsRedraw;
        }
        KeyCode::Enter => {
            app.submit_form();
            return EventResult::NeedsRedraw;
        }
        _ => {}
    }

    let Some(form) = app.form_mut() else {
        return EventResult::Continue;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => form.cursor_left(),
        KeyCode::Right => form.cursor_right(),
        KeyCode::Home => form.cursor_home(),
        KeyCode::End => form.cursor_end(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Delete => form.delete(),
        KeyCode::Char(c) => form.type_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

#[cfg(test)]
mod tests {
    use super::*;
    use hns_core::{AppState, Client, CredentialStore};

    fn app() -> App {
        let client = Client::new("http://127.0.0.1:1").unwrap();
        App::new(AppState::new(
            client,
            CredentialStore::at("/nonexistent/credentials.json"),
        ))
    }

    fn press(app: &mut App, code: KeyCode) -> EventResult {
        handle_event(app, Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('q')), EventResult::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_event(&mut app, Event::Key(ctrl_c)), EventResult::Quit);
    }

    #[test]
    fn test_refresh_queues_action() {
        let mut app = app();
        assert_eq!(press(&mut app, KeyCode::Char('r')), EventResult::ProcessAction);
        assert_eq!(app.take_pending_action(), Some(PendingAction::Refresh));
    }

    #[test]
    fn test_help_overlay_toggles() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(matches!(app.overlay(), Some(Overlay::Help)));

        // List keys are ignored while help is open
        assert_eq!(press(&mut app, KeyCode::Char('r')), EventResult::Continue);
        assert!(!app.has_pending_action());

        press(&mut app, KeyCode::Esc);
        assert!(!app.has_overlay());
    }

    #[test]
    fn test_typing_q_in_a_form_is_text() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        assert!(app.has_overlay());

        assert_eq!(press(&mut app, KeyCode::Char('q')), EventResult::NeedsRedraw);
        assert!(app.has_overlay());
    }

    #[test]
    fn test_signup_form_flow() {
        let mut app = app();
        press(&mut app, KeyCode::Char('n'));

        type_str(&mut app, "Alice");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "alice");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "pw");

        assert_eq!(press(&mut app, KeyCode::Enter), EventResult::ProcessAction);
        assert!(!app.has_overlay());
        assert_eq!(
            app.take_pending_action(),
            Some(PendingAction::Signup {
                username: "alice".to_string(),
                password: "pw".to_string(),
                name: "Alice".to_string(),
            })
        );
    }

    #[test]
    fn test_escape_cancels_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        type_str(&mut app, "alice");
        press(&mut app, KeyCode::Esc);

        assert!(!app.has_overlay());
        assert!(!app.has_pending_action());
    }

    #[test]
    fn test_user_only_keys_when_anonymous() {
        let mut app = app();

        for key in ['2', '3', 'f', 's', 'L'] {
            assert_eq!(press(&mut app, KeyCode::Char(key)), EventResult::NeedsRedraw);
            assert!(!app.has_overlay(), "{key}");
            assert!(!app.has_pending_action(), "{key}");
        }
        assert_eq!(app.view(), View::All);
    }
}
