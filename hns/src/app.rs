//! Main application state and logic

use std::sync::Arc;

use hns_core::{AppState, FavoriteChange, NewStory, SessionError, Story, StoryId};
use tracing::warn;

use crate::form::Form;
use crate::ui::theme::HnsTheme;
use crate::ui::Overlay;

/// Which story list is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The global feed
    #[default]
    All,
    Favorites,
    /// Stories the user posted
    Mine,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::All => "All stories",
            View::Favorites => "Favorites",
            View::Mine => "My stories",
        }
    }
}

/// A network action queued by a key event, run by the main loop before the
/// next event is read.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Refresh,
    Login {
        username: String,
        password: String,
    },
    Signup {
        username: String,
        password: String,
        name: String,
    },
    Logout,
    Submit(NewStory),
    ToggleFavorite(StoryId),
    Delete(StoryId),
}

/// Main application state
pub struct App {
    pub state: AppState,
    pub theme: HnsTheme,

    view: View,
    selected: usize,
    overlay: Option<Overlay>,
    pending_action: Option<PendingAction>,

    status_message: Option<String>,
}

impl App {
    pub fn new(state: AppState) -> Self {
        let status = match state.current_user() {
            Some(user) => format!("Welcome back, {}! Press ? for help", user.name()),
            None => "Press l to log in, n to sign up, ? for help".to_string(),
        };

        Self {
            state,
            theme: HnsTheme::default(),
            view: View::All,
            selected: 0,
            overlay: None,
            pending_action: None,
            status_message: Some(status),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Switch lists. Favorites and My stories need a logged-in user.
    pub fn set_view(&mut self, view: View) {
        if view != View::All && !self.state.is_logged_in() {
            self.set_status(format!("Log in to see {}", view.title().to_lowercase()));
            return;
        }
        self.view = view;
        self.selected = 0;
        self.clear_status();
    }

    /// Stories in the current view, in display order.
    pub fn visible_stories(&self) -> &[Arc<Story>] {
        match (self.view, self.state.current_user()) {
            (View::All, _) => self.state.story_list().stories(),
            (View::Favorites, Some(user)) => user.favorites.stories(),
            (View::Mine, Some(user)) => user.own_stories.stories(),
            (_, None) => &[],
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_story(&self) -> Option<&Arc<Story>> {
        self.visible_stories().get(self.selected)
    }

    pub fn select_next(&mut self) {
        let len = self.visible_stories().len();
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_stories().len().saturating_sub(1);
    }

    /// Keep the selection inside the list after it shrinks.
    fn clamp_selection(&mut self) {
        let len = self.visible_stories().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Queue a network action for the main loop.
    pub fn queue_action(&mut self, action: PendingAction) {
        self.pending_action = Some(action);
    }

    pub fn take_pending_action(&mut self) -> Option<PendingAction> {
        self.pending_action.take()
    }

    pub fn has_pending_action(&self) -> bool {
        self.pending_action.is_some()
    }

    /// Queue a favorite toggle for the selected story.
    pub fn toggle_selected_favorite(&mut self) {
        if !self.state.is_logged_in() {
            self.set_status("Log in to favorite stories");
            return;
        }
        match self.selected_story() {
            Some(story) => {
                let id = story.story_id().clone();
                self.queue_action(PendingAction::ToggleFavorite(id));
            }
            None => self.set_status("No story selected"),
        }
    }

    /// Queue deletion of the selected story. Only allowed from My stories.
    pub fn delete_selected(&mut self) {
        if self.view != View::Mine {
            self.set_status("Switch to My stories (3) to delete");
            return;
        }
        match self.selected_story() {
            Some(story) => {
                let id = story.story_id().clone();
                self.queue_action(PendingAction::Delete(id));
            }
            None => self.set_status("No story selected"),
        }
    }

    pub fn open_login(&mut self) {
        match self.state.current_user() {
            Some(user) => {
                let message = format!("Already logged in as {}", user.username());
                self.set_status(message);
            }
            None => self.overlay = Some(Overlay::Form(Form::login())),
        }
    }

    pub fn open_signup(&mut self) {
        if self.state.is_logged_in() {
            self.set_status("Log out first to create another account");
        } else {
            self.overlay = Some(Overlay::Form(Form::signup()));
        }
    }

    pub fn open_submit(&mut self) {
        if self.state.is_logged_in() {
            self.overlay = Some(Overlay::Form(Form::submit_story()));
        } else {
            self.set_status("Log in to submit stories");
        }
    }

    pub fn logout(&mut self) {
        if self.state.is_logged_in() {
            self.queue_action(PendingAction::Logout);
        } else {
            self.set_status("Not logged in");
        }
    }

    /// Submit the open form, closing it if its input is complete.
    pub fn submit_form(&mut self) {
        let Some(Overlay::Form(form)) = &self.overlay else {
            return;
        };
        match form.submit() {
            Ok(action) => {
                self.overlay = None;
                self.queue_action(action);
            }
            Err(message) => self.set_status(message),
        }
    }

    /// Run a queued action and report the outcome in the status line.
    pub async fn perform(&mut self, action: PendingAction) {
        match self.run_action(action).await {
            Ok(message) => self.set_status(message),
            Err(e) => {
                warn!(error = %e, "action failed");
                self.set_status(format!("Error: {e}"));
            }
        }
        self.clamp_selection();
    }

    async fn run_action(&mut self, action: PendingAction) -> Result<String, SessionError> {
        match action {
            PendingAction::Refresh => {
                self.state.refresh_stories().await?;
                Ok(format!("Loaded {} stories", self.state.story_list().len()))
            }
            PendingAction::Login { username, password } => {
                let user = self.state.login(&username, &password).await?;
                Ok(format!("Welcome, {}!", user.name()))
            }
            PendingAction::Signup {
                username,
                password,
                name,
            } => {
                let user = self.state.signup(&username, &password, &name).await?;
                Ok(format!("Account created for {}", user.username()))
            }
            PendingAction::Logout => {
                self.state.logout().await?;
                self.view = View::All;
                Ok("Logged out".to_string())
            }
            PendingAction::Submit(new_story) => {
                let story = self.state.submit_story(new_story).await?;
                self.view = View::All;
                self.selected = 0;
                Ok(format!("Posted \"{}\"", story.title()))
            }
            PendingAction::ToggleFavorite(story_id) => {
                match self.state.toggle_favorite(&story_id).await? {
                    FavoriteChange::Added => Ok("Added to favorites".to_string()),
                    FavoriteChange::Removed => Ok("Removed from favorites".to_string()),
                }
            }
            PendingAction::Delete(story_id) => {
                self.state.delete_story(&story_id).await?;
                Ok("Story deleted".to_string())
            }
        }
    }

    // =========================================================================
    // Overlays and status
    // =========================================================================

    pub fn toggle_help(&mut self) {
        if matches!(self.overlay, Some(Overlay::Help)) {
            self.overlay = None;
        } else {
            self.overlay = Some(Overlay::Help);
        }
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    /// The open form, if any
    pub fn form_mut(&mut self) -> Option<&mut Form> {
        match &mut self.overlay {
            Some(Overlay::Form(form)) => Some(form),
            _ => None,
        }
    }

    /// Set status message (always overwrites)
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
