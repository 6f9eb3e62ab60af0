//! Request/response behaviour of the client against a stub server.

use hns_api::{Client, Error, NewStory};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn story_json(id: &str) -> serde_json::Value {
    json!({
        "storyId": id,
        "author": "Ada",
        "title": "Notes",
        "url": "https://example.com/notes",
        "username": "ada",
        "createdAt": "2021-03-01T10:00:00.000Z",
        "updatedAt": "2021-03-01T10:00:00.000Z"
    })
}

#[tokio::test]
async fn test_get_stories_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stories": [story_json("b"), story_json("a")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let stories = client.get_stories().await.unwrap();

    let ids: Vec<_> = stories.iter().map(|s| s.story_id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
}

#[tokio::test]
async fn test_create_story_sends_token_and_story() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/stories"))
        .and(body_json(json!({
            "token": "tok",
            "story": { "author": "Ada", "title": "Notes", "url": "https://example.com/notes" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "story": story_json("new-id")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let story = NewStory::new("Ada", "Notes", "https://example.com/notes");
    let record = client.create_story("tok", &story).await.unwrap();

    assert_eq!(record.story_id, "new-id");
}

#[tokio::test]
async fn test_delete_story_sends_token_in_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/stories/s1"))
        .and(body_json(json!({ "token": "tok" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Deleted story 's1'",
            "story": story_json("s1")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    client.delete_story("tok", "s1").await.unwrap();
}

#[tokio::test]
async fn test_get_user_passes_token_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ada"))
        .and(query_param("token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {
                "username": "ada",
                "name": "Ada",
                "createdAt": "2021-01-01T00:00:00.000Z",
                "updatedAt": "2021-01-01T00:00:00.000Z",
                "favorites": [story_json("f1")],
                "stories": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let user = client.get_user("tok", "ada").await.unwrap();

    assert_eq!(user.name, "Ada");
    assert_eq!(user.favorites.len(), 1);
    assert!(user.stories.is_empty());
}

#[tokio::test]
async fn test_favorite_endpoints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/users/ada/favorites/s1"))
        .and(body_json(json!({ "token": "tok" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/ada/favorites/s1"))
        .and(body_json(json!({ "token": "tok" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    client.add_favorite("tok", "ada", "s1").await.unwrap();
    client.remove_favorite("tok", "ada", "s1").await.unwrap();
}

#[tokio::test]
async fn test_error_status_becomes_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid credentials"))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let err = client.login("ada", "wrong").await.unwrap_err();

    match &err {
        Error::Api { status, message } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Invalid credentials");
        }
        other => panic!("expected API error, got {other:?}"),
    }
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_malformed_body_becomes_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let client = Client::new(server.uri()).unwrap();
    let err = client.get_stories().await.unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
}

#[tokio::test]
async fn test_unreachable_server_becomes_network_error() {
    // Nothing listens on port 1.
    let client = Client::new("http://127.0.0.1:1").unwrap();
    let err = client.get_stories().await.unwrap_err();

    assert!(matches!(err, Error::Network(_)));
}
