//! Minimal Hack-or-Snooze API client.
//!
//! This crate provides a focused client for the story-sharing REST API:
//! - One method per remote endpoint (stories, accounts, favorites)
//! - Explicit request and response schemas, parsed at the boundary
//! - A single error type for transport, status and decoding failures

use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Base URL of the public service.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the service.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The service rejected the credential (missing, invalid or expired token).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api { status: 401, .. })
    }
}

/// Hack-or-Snooze API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// Create a client for the given base URL with default timeouts.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, Error> {
        Self::with_timeouts(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a client with explicit request and connect timeouts.
    pub fn with_timeouts(
        base_url: impl AsRef<str>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url.as_ref().trim_end_matches('/'))
            .map_err(|e| Error::Config(format!("Invalid base URL: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Base URL cannot carry a path: {base_url}"
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ------------------------------------------------------------------------
    // Stories
    // ------------------------------------------------------------------------

    /// Fetch the global story feed. No credential required.
    pub async fn get_stories(&self) -> Result<Vec<StoryRecord>, Error> {
        let request = self.request(Method::GET, &["stories"])?;
        let body: StoriesEnvelope = self.fetch(request).await?;
        Ok(body.stories)
    }

    /// Post a new story on behalf of the token's owner.
    pub async fn create_story(
        &self,
        token: &str,
        story: &NewStory,
    ) -> Result<StoryRecord, Error> {
        let request = self
            .request(Method::POST, &["stories"])?
            .json(&CreateStoryBody { token, story });
        let body: StoryEnvelope = self.fetch(request).await?;
        Ok(body.story)
    }

    /// Delete a story. The token must belong to the story's author.
    pub async fn delete_story(&self, token: &str, story_id: &str) -> Result<(), Error> {
        let request = self
            .request(Method::DELETE, &["stories", story_id])?
            .json(&TokenBody { token });
        self.execute(request).await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------------

    /// Register a new account.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AuthResponse, Error> {
        let request = self.request(Method::POST, &["signup"])?.json(&SignupBody {
            user: SignupUser {
                username,
                password,
                name,
            },
        });
        self.fetch(request).await
    }

    /// Exchange a username and password for a token and the user's profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, Error> {
        let request = self.request(Method::POST, &["login"])?.json(&LoginBody {
            user: LoginUser { username, password },
        });
        self.fetch(request).await
    }

    /// Fetch a user's profile, passing the token as a query parameter.
    pub async fn get_user(&self, token: &str, username: &str) -> Result<UserRecord, Error> {
        let request = self
            .request(Method::GET, &["users", username])?
            .query(&[("token", token)]);
        let body: UserEnvelope = self.fetch(request).await?;
        Ok(body.user)
    }

    // ------------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------------

    /// Mark a story as one of the user's favorites.
    pub async fn add_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), Error> {
        let request = self
            .request(Method::POST, &["users", username, "favorites", story_id])?
            .json(&TokenBody { token });
        self.execute(request).await?;
        Ok(())
    }

    /// Remove a story from the user's favorites.
    pub async fn remove_favorite(
        &self,
        token: &str,
        username: &str,
        story_id: &str,
    ) -> Result<(), Error> {
        let request = self
            .request(Method::DELETE, &["users", username, "favorites", story_id])?
            .json(&TokenBody { token });
        self.execute(request).await?;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------------

    fn endpoint(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Base URL cannot carry a path: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, Error> {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "sending request");
        Ok(self.http.request(method, url))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<reqwest::Response, Error> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "request rejected by service");
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let response = self.execute(request).await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| Error::Parse(e.to_string()))
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A story as the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    pub story_id: String,
    pub author: String,
    pub title: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user profile as the service returns it.
///
/// Signup responses omit the story arrays; they default to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub username: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub favorites: Vec<StoryRecord>,
    #[serde(default)]
    pub stories: Vec<StoryRecord>,
}

/// Response to signup and login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserRecord,
}

/// The fields a user supplies when submitting a story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStory {
    pub author: String,
    pub title: String,
    pub url: String,
}

impl NewStory {
    pub fn new(
        author: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
struct TokenBody<'a> {
    token: &'a str,
}

#[derive(Debug, Serialize)]
struct CreateStoryBody<'a> {
    token: &'a str,
    story: &'a NewStory,
}

#[derive(Debug, Serialize)]
struct SignupBody<'a> {
    user: SignupUser<'a>,
}

#[derive(Debug, Serialize)]
struct SignupUser<'a> {
    username: &'a str,
    password: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    user: LoginUser<'a>,
}

#[derive(Debug, Serialize)]
struct LoginUser<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct StoriesEnvelope {
    stories: Vec<StoryRecord>,
}

#[derive(Debug, Deserialize)]
struct StoryEnvelope {
    story: StoryRecord,
}

#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: UserRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = Client::new(DEFAULT_BASE_URL).unwrap();
        assert_eq!(client.base_url().host_str(), Some("hack-or-snooze-v3.herokuapp.com"));
    }

    #[test]
    fn test_client_rejects_invalid_url() {
        let err = Client::new("not a url").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_endpoint_ignores_trailing_slash() {
        let client = Client::new("http://localhost:3000/").unwrap();
        let url = client.endpoint(&["stories"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/stories");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let client = Client::new("http://localhost:3000/api/v3").unwrap();
        let url = client
            .endpoint(&["users", "alice", "favorites", "abc-123"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/v3/users/alice/favorites/abc-123"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = Client::new("http://localhost:3000").unwrap();
        let url = client.endpoint(&["users", "a b/c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/users/a%20b%2Fc");
    }

    #[test]
    fn test_user_record_without_story_arrays() {
        let user: UserRecord = serde_json::from_value(json!({
            "username": "alice",
            "name": "Alice",
            "createdAt": "2020-01-01T00:00:00.000Z",
            "updatedAt": "2020-01-02T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(user.username, "alice");
        assert!(user.favorites.is_empty());
        assert!(user.stories.is_empty());
    }

    #[test]
    fn test_story_record_uses_camel_case() {
        let story: StoryRecord = serde_json::from_value(json!({
            "storyId": "s1",
            "author": "A",
            "title": "T",
            "url": "http://x.com",
            "username": "alice",
            "createdAt": "2020-01-01T00:00:00.000Z",
            "updatedAt": "2020-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(story.story_id, "s1");
        assert_eq!(story.url, "http://x.com");
    }

    #[test]
    fn test_story_record_missing_field_is_rejected() {
        let result = serde_json::from_value::<StoryRecord>(json!({
            "storyId": "s1",
            "title": "T"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_create_story_body_shape() {
        let story = NewStory::new("A", "T", "http://x.com");
        let body = serde_json::to_value(CreateStoryBody {
            token: "tok",
            story: &story,
        })
        .unwrap();

        assert_eq!(
            body,
            json!({
                "token": "tok",
                "story": { "author": "A", "title": "T", "url": "http://x.com" }
            })
        );
    }

    #[test]
    fn test_is_unauthorized() {
        let err = Error::Api {
            status: 401,
            message: "Unauthorized".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!Error::Network("reset".to_string()).is_unauthorized());
    }
}
