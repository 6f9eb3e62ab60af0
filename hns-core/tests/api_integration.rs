//! Integration tests that call the live Hack or Snooze service.
//!
//! Account tests need HNS_TEST_USERNAME and HNS_TEST_PASSWORD (via .env file
//! or environment). HNS_BASE_URL points them at another deployment.
//! Run with: `cargo test -p hns-core --test api_integration -- --ignored`
//!
//! These are marked #[ignore] by default to avoid network access in CI.

use hns_core::{ClientConfig, StoryList, User};

/// Load environment variables from .env file
fn setup() -> ClientConfig {
    let _ = dotenvy::dotenv();
    ClientConfig::from_env().expect("Invalid configuration")
}

fn test_account() -> Option<(String, String)> {
    let username = std::env::var("HNS_TEST_USERNAME").ok()?;
    let password = std::env::var("HNS_TEST_PASSWORD").ok()?;
    Some((username, password))
}

#[tokio::test]
#[ignore] // Run with: cargo test -p hns-core --test api_integration -- --ignored
async fn test_live_feed_loads() {
    let config = setup();
    let client = config.build_client().expect("Failed to build client");

    let list = StoryList::get_stories(&client)
        .await
        .expect("Feed should load");

    for story in list.iter() {
        assert!(!story.story_id().as_str().is_empty());
    }
}

#[tokio::test]
#[ignore]
async fn test_live_login_and_restore() {
    let config = setup();
    let Some((username, password)) = test_account() else {
        eprintln!("Skipping test: HNS_TEST_USERNAME / HNS_TEST_PASSWORD not set");
        return;
    };
    let client = config.build_client().expect("Failed to build client");

    let user = User::login(&client, &username, &password)
        .await
        .expect("Login should succeed");
    let creds = user.credentials();

    let restored = User::get_logged_in_user(&client, Some(&creds.token), Some(&creds.username))
        .await
        .expect("Restore should succeed")
        .expect("Credentials were present");

    assert_eq!(restored.username(), user.username());
    assert_eq!(restored.favorites.len(), user.favorites.len());
}
