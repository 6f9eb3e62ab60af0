//! AppState - everything the front end needs between events.
//!
//! This module owns the current user and the story feed and exposes one
//! method per user action. Each action performs the remote effect first and
//! only then updates the local projection, so a failed call leaves the state
//! exactly as it was.

use std::sync::Arc;

use hns_api::{Client, NewStory};
use thiserror::Error;
use tracing::info;

use crate::store::{CredentialStore, StoreError};
use crate::story::{Story, StoryId};
use crate::story_list::StoryList;
use crate::user::User;

/// Errors from AppState operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("API error: {0}")]
    Api(#[from] hns_api::Error),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),

    #[error("You need to log in first")]
    NotLoggedIn,

    #[error("Story {0} is not loaded")]
    StoryNotFound(StoryId),
}

/// Which way a favorite toggle went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteChange {
    Added,
    Removed,
}

/// Application state owned by the controller.
///
/// The session is either anonymous (`current_user` is `None`) or
/// authenticated. Only [`login`](Self::login), [`signup`](Self::signup) and
/// [`restore`](Self::restore) authenticate; only [`logout`](Self::logout)
/// goes back.
pub struct AppState {
    client: Client,
    store: CredentialStore,
    current_user: Option<User>,
    story_list: StoryList,
}

impl AppState {
    /// Anonymous state with an empty feed. Performs no I/O.
    pub fn new(client: Client, store: CredentialStore) -> Self {
        Self {
            client,
            store,
            current_user: None,
            story_list: StoryList::new(),
        }
    }

    /// Restore the previous session, if any, then load the feed.
    ///
    /// A stored token the service no longer accepts is an error, and so is
    /// a failed feed fetch. Callers that want to keep the user when only the
    /// feed is down use [`restore_user`](Self::restore_user) and
    /// [`refresh_stories`](Self::refresh_stories) separately.
    pub async fn restore(client: Client, store: CredentialStore) -> Result<Self, SessionError> {
        let mut state = Self::restore_user(client, store).await?;
        state.refresh_stories().await?;
        Ok(state)
    }

    /// Restore the previous session's user without loading the feed.
    pub async fn restore_user(
        client: Client,
        store: CredentialStore,
    ) -> Result<Self, SessionError> {
        let stored = store.load().await?.unwrap_or_default();
        let current_user = User::get_logged_in_user(
            &client,
            Some(stored.token.as_str()),
            Some(stored.username.as_str()),
        )
        .await?;

        let mut state = Self::new(client, store);
        state.current_user = current_user;
        Ok(state)
    }

    /// Log in and remember the credentials.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<&User, SessionError> {
        let user = User::login(&self.client, username, password).await?;
        self.store.save(&user.credentials()).await?;
        let user: &User = self.current_user.insert(user);
        Ok(user)
    }

    /// Create an account, log in as it, and remember the credentials.
    pub async fn signup(
        &mut self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<&User, SessionError> {
        let user = User::create(&self.client, username, password, name).await?;
        self.store.save(&user.credentials()).await?;
        let user: &User = self.current_user.insert(user);
        Ok(user)
    }

    /// Forget the stored credentials and drop the current user.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        self.store.clear().await?;
        if let Some(user) = self.current_user.take() {
            info!(username = %user.username(), "logged out");
        }
        Ok(())
    }

    /// Reload the global feed.
    pub async fn refresh_stories(&mut self) -> Result<(), SessionError> {
        self.story_list = StoryList::get_stories(&self.client).await?;
        Ok(())
    }

    /// Post a story; it appears at the top of the feed and of the user's stories.
    pub async fn submit_story(&mut self, new_story: NewStory) -> Result<Arc<Story>, SessionError> {
        let user = self.current_user.as_mut().ok_or(SessionError::NotLoggedIn)?;
        let story = self
            .story_list
            .add_story(&self.client, user, new_story)
            .await?;
        Ok(story)
    }

    /// Star or unstar a story, depending on whether it is a favorite now.
    ///
    /// Starring needs the story itself so the favorites list can share it;
    /// it is looked up in the feed, then in the user's own stories, before
    /// anything is sent.
    pub async fn toggle_favorite(
        &mut self,
        story_id: &StoryId,
    ) -> Result<FavoriteChange, SessionError> {
        let user = self.current_user.as_mut().ok_or(SessionError::NotLoggedIn)?;

        if user.is_favorite(story_id) {
            user.delete_favorite(&self.client, story_id).await?;
            user.favorites.remove_story_from_list(story_id);
            return Ok(FavoriteChange::Removed);
        }

        let story = self
            .story_list
            .get_story_by_id(story_id)
            .or_else(|| user.own_stories.get_story_by_id(story_id))
            .ok_or_else(|| SessionError::StoryNotFound(story_id.clone()))?;

        user.add_favorite(&self.client, story_id).await?;
        user.favorites.add_story_to_list(story);
        Ok(FavoriteChange::Added)
    }

    /// Delete one of the user's stories and drop it from every loaded list.
    pub async fn delete_story(&mut self, story_id: &StoryId) -> Result<(), SessionError> {
        let user = self.current_user.as_mut().ok_or(SessionError::NotLoggedIn)?;

        self.story_list
            .delete_story(&self.client, user, story_id)
            .await?;

        user.own_stories.remove_story_from_list(story_id);
        user.favorites.remove_story_from_list(story_id);
        self.story_list.remove_story_from_list(story_id);
        Ok(())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    /// The global feed.
    pub fn story_list(&self) -> &StoryList {
        &self.story_list
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Whether the signed-in user has starred the story. False when anonymous.
    pub fn is_favorite(&self, story_id: &StoryId) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|user| user.is_favorite(story_id))
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }
}
