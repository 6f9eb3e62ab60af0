//! The signed-in account.

use chrono::{DateTime, Utc};
use hns_api::{AuthResponse, Client, Error, UserRecord};
use tracing::{debug, info};

use crate::store::StoredCredentials;
use crate::story::StoryId;
use crate::story_list::StoryList;

/// An authenticated user with their favorites and submitted stories.
///
/// Favorite and story lists are plain projections: the network methods on
/// `User` never update them, callers do that once the remote call succeeds.
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    login_token: String,

    /// Stories the user has starred.
    pub favorites: StoryList,

    /// Stories the user has posted.
    pub own_stories: StoryList,
}

impl User {
    /// Register a new account.
    ///
    /// The returned user carries the new token and empty story lists.
    pub async fn create(
        client: &Client,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, Error> {
        let AuthResponse { token, user } = client.signup(username, password, name).await?;
        info!(username = %user.username, "account created");
        Ok(Self::without_stories(user, token))
    }

    /// Log in with a username and password.
    pub async fn login(client: &Client, username: &str, password: &str) -> Result<Self, Error> {
        let AuthResponse { token, user } = client.login(username, password).await?;
        info!(username = %user.username, "logged in");
        Ok(Self::with_stories(user, token))
    }

    /// Rebuild the user from a stored token and username.
    ///
    /// Returns `Ok(None)`, without touching the network, when either value is
    /// missing or empty. An expired or invalid token is an error; there is
    /// no refresh.
    pub async fn get_logged_in_user(
        client: &Client,
        token: Option<&str>,
        username: Option<&str>,
    ) -> Result<Option<Self>, Error> {
        let token = token.filter(|t| !t.is_empty());
        let username = username.filter(|u| !u.is_empty());
        let (Some(token), Some(username)) = (token, username) else {
            debug!("no stored credentials, staying anonymous");
            return Ok(None);
        };

        let record = client.get_user(token, username).await?;
        info!(username = %record.username, "session restored");
        Ok(Some(Self::with_stories(record, token.to_string())))
    }

    /// Star a story on the server. `favorites` is left untouched.
    pub async fn add_favorite(&self, client: &Client, story_id: &StoryId) -> Result<(), Error> {
        client
            .add_favorite(&self.login_token, &self.username, story_id.as_str())
            .await
    }

    /// Unstar a story on the server. `favorites` is left untouched.
    pub async fn delete_favorite(&self, client: &Client, story_id: &StoryId) -> Result<(), Error> {
        client
            .remove_favorite(&self.login_token, &self.username, story_id.as_str())
            .await
    }

    /// Whether the story is in the local favorites list.
    pub fn is_favorite(&self, story_id: &StoryId) -> bool {
        self.favorites.contains(story_id)
    }

    /// The values to persist so the session survives a restart.
    pub fn credentials(&self) -> StoredCredentials {
        StoredCredentials {
            token: self.login_token.clone(),
            username: self.username.clone(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Full display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn login_token(&self) -> &str {
        &self.login_token
    }

    fn without_stories(record: UserRecord, token: String) -> Self {
        Self {
            username: record.username,
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
            login_token: token,
            favorites: StoryList::new(),
            own_stories: StoryList::new(),
        }
    }

    fn with_stories(mut record: UserRecord, token: String) -> Self {
        let favorites = StoryList::build_story_list(std::mem::take(&mut record.favorites));
        let own_stories = StoryList::build_story_list(std::mem::take(&mut record.stories));

        Self {
            favorites,
            own_stories,
            ..Self::without_stories(record, token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{story_record, user_record};

    #[test]
    fn test_with_stories_populates_lists() {
        let record = user_record("alice", &["f1", "f2"], &["s1"]);
        let user = User::with_stories(record, "tok".to_string());

        assert_eq!(user.username(), "alice");
        assert_eq!(user.login_token(), "tok");
        assert_eq!(user.favorites.len(), 2);
        assert_eq!(user.own_stories.len(), 1);
        assert!(user.is_favorite(&StoryId::from("f2")));
        assert!(!user.is_favorite(&StoryId::from("s1")));
    }

    #[test]
    fn test_without_stories_ignores_arrays() {
        let record = user_record("alice", &["f1"], &["s1"]);
        let user = User::without_stories(record, "tok".to_string());

        assert!(user.favorites.is_empty());
        assert!(user.own_stories.is_empty());
    }

    #[test]
    fn test_credentials() {
        let user = User::without_stories(user_record("alice", &[], &[]), "tok".to_string());
        let creds = user.credentials();

        assert_eq!(creds.token, "tok");
        assert_eq!(creds.username, "alice");
    }

    #[test]
    fn test_favorites_are_caller_managed() {
        let mut user = User::without_stories(user_record("alice", &[], &[]), "tok".to_string());
        let story = StoryList::build_story_list(vec![story_record("x", "bob")])
            .get_story_by_id(&StoryId::from("x"))
            .unwrap();

        user.favorites.add_story_to_list(story);
        assert!(user.is_favorite(&StoryId::from("x")));

        user.favorites.remove_story_from_list(&StoryId::from("x"));
        assert!(!user.is_favorite(&StoryId::from("x")));
    }
}
