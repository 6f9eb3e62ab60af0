//! A single submitted story.

use chrono::{DateTime, Utc};
use hns_api::{NewStory, StoryRecord};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier the service assigns to a story.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(String);

impl StoryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StoryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StoryId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for StoryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A story as projected from a server response.
///
/// Stories are never mutated after construction. Lists share them through
/// `Arc`, so the same story can sit in the feed and in a user's favorites.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Story {
    story_id: StoryId,
    author: String,
    title: String,
    url: String,
    username: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Story {
    /// Build the story for a fresh submission.
    ///
    /// Author, title and url come from what was submitted; the poster's
    /// username, the id and both timestamps come from the server.
    pub fn from_submission(submitted: NewStory, created: StoryRecord) -> Self {
        Self {
            story_id: StoryId(created.story_id),
            author: submitted.author,
            title: submitted.title,
            url: submitted.url,
            username: created.username,
            created_at: created.created_at,
            updated_at: created.updated_at,
        }
    }

    pub fn story_id(&self) -> &StoryId {
        &self.story_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Username of the account that posted the story.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Host part of the story's url, without a leading `www.`.
    pub fn host_name(&self) -> &str {
        host_name(&self.url)
    }
}

impl From<StoryRecord> for Story {
    fn from(record: StoryRecord) -> Self {
        Self {
            story_id: StoryId(record.story_id),
            author: record.author,
            title: record.title,
            url: record.url,
            username: record.username,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// Extract the host from a url-ish string.
///
/// With a scheme the host is the third `/`-separated segment, otherwise the
/// first. Urls are user input, so anything unexpected yields an empty or
/// partial host rather than an error.
pub fn host_name(url: &str) -> &str {
    let host = if url.contains("://") {
        url.split('/').nth(2)
    } else {
        url.split('/').next()
    }
    .unwrap_or_default();

    host.strip_prefix("www.").unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::story_record;

    #[test]
    fn test_story_from_record_copies_fields() {
        let record = story_record("s1", "alice");
        let story = Story::from(record.clone());

        assert_eq!(story.story_id().as_str(), "s1");
        assert_eq!(story.author(), record.author);
        assert_eq!(story.title(), record.title);
        assert_eq!(story.url(), record.url);
        assert_eq!(story.username(), "alice");
        assert_eq!(story.created_at(), record.created_at);
        assert_eq!(story.updated_at(), record.updated_at);
    }

    #[test]
    fn test_story_from_submission_merges_fields() {
        let submitted = NewStory::new("A", "T", "http://x.com");
        // The server echo may differ from what was typed; the submission wins.
        let mut created = story_record("new-id", "bob");
        created.title = "server title".to_string();

        let story = Story::from_submission(submitted, created);

        assert_eq!(story.story_id().as_str(), "new-id");
        assert_eq!(story.title(), "T");
        assert_eq!(story.author(), "A");
        assert_eq!(story.url(), "http://x.com");
        assert_eq!(story.username(), "bob");
    }

    #[test]
    fn test_host_name_with_scheme() {
        assert_eq!(host_name("https://www.rust-lang.org/learn"), "rust-lang.org");
        assert_eq!(host_name("http://news.example.com"), "news.example.com");
    }

    #[test]
    fn test_host_name_without_scheme() {
        assert_eq!(host_name("www.example.com/a/b"), "example.com");
        assert_eq!(host_name("example.com"), "example.com");
    }

    #[test]
    fn test_host_name_degenerate_input() {
        assert_eq!(host_name(""), "");
        assert_eq!(host_name("http://"), "");
    }

    #[test]
    fn test_story_id_display() {
        let id = StoryId::from("abc-123");
        assert_eq!(id.to_string(), "abc-123");
        assert_eq!(id, StoryId::new(String::from("abc-123")));
    }
}
