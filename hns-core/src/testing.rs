//! Testing utilities.
//!
//! Canned server payloads shaped exactly like the service's responses, for
//! unit tests and for stub servers in integration tests:
//! - `*_json` builders return the wire JSON
//! - `*_record` builders return the parsed records

use chrono::{DateTime, Utc};
use hns_api::{StoryRecord, UserRecord};
use serde_json::{json, Value};

/// Token handed out by fixture auth responses.
pub const FIXTURE_TOKEN: &str = "fixture-token";

/// 2023-05-01T12:00:00Z
const FIXTURE_EPOCH_SECS: i64 = 1_682_942_400;

/// Timestamp used for every fixture record.
pub fn fixture_time() -> DateTime<Utc> {
    DateTime::from_timestamp(FIXTURE_EPOCH_SECS, 0).unwrap_or_default()
}

/// A story record with fields derived from its id.
pub fn story_record(story_id: &str, username: &str) -> StoryRecord {
    StoryRecord {
        story_id: story_id.to_string(),
        author: format!("Author of {story_id}"),
        title: format!("Title {story_id}"),
        url: format!("https://www.example.com/{story_id}"),
        username: username.to_string(),
        created_at: fixture_time(),
        updated_at: fixture_time(),
    }
}

/// A user record whose favorites and stories have the given ids.
///
/// Favorites are attributed to `someone-else`, own stories to `username`.
pub fn user_record(username: &str, favorites: &[&str], stories: &[&str]) -> UserRecord {
    UserRecord {
        username: username.to_string(),
        name: format!("{username} fixture"),
        created_at: fixture_time(),
        updated_at: fixture_time(),
        favorites: favorites
            .iter()
            .map(|id| story_record(id, "someone-else"))
            .collect(),
        stories: stories.iter().map(|id| story_record(id, username)).collect(),
    }
}

/// Wire form of [`story_record`].
pub fn story_json(story_id: &str, username: &str) -> Value {
    json!(story_record(story_id, username))
}

/// `GET /stories` response body.
pub fn stories_json(story_ids: &[&str], username: &str) -> Value {
    let stories: Vec<Value> = story_ids
        .iter()
        .map(|id| story_json(id, username))
        .collect();
    json!({ "stories": stories })
}

/// `POST /stories` response body.
pub fn created_story_json(story_id: &str, username: &str) -> Value {
    json!({ "story": story_json(story_id, username) })
}

/// `GET /users/{username}` response body.
pub fn user_json(username: &str, favorites: &[&str], stories: &[&str]) -> Value {
    json!({ "user": user_record(username, favorites, stories) })
}

/// `POST /login` response body.
pub fn login_json(username: &str, favorites: &[&str], stories: &[&str]) -> Value {
    json!({
        "token": FIXTURE_TOKEN,
        "user": user_record(username, favorites, stories),
    })
}

/// `POST /signup` response body. New accounts have no story arrays.
pub fn signup_json(username: &str, name: &str) -> Value {
    json!({
        "token": FIXTURE_TOKEN,
        "user": {
            "username": username,
            "name": name,
            "createdAt": fixture_time(),
            "updatedAt": fixture_time(),
        }
    })
}
