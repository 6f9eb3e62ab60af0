//! Hack or Snooze client core.
//!
//! This crate provides:
//! - Story, story list and user models built from the service's records
//! - The remote-then-local actions behind every user command
//! - Credential persistence so a session survives a restart
//! - Environment-driven configuration
//!
//! # Quick Start
//!
//! ```ignore
//! use hns_core::{AppState, ClientConfig, NewStory};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let mut state = AppState::restore(config.build_client()?, config.credential_store()?).await?;
//!
//!     state.login("alice", "hunter2").await?;
//!     let story = state
//!         .submit_story(NewStory::new("Ada", "Notes", "https://example.com/notes"))
//!         .await?;
//!     println!("posted {} ({})", story.title(), story.host_name());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod session;
pub mod store;
pub mod story;
pub mod story_list;
pub mod testing;
pub mod user;

// Primary public API
pub use config::{ClientConfig, ConfigError};
pub use session::{AppState, FavoriteChange, SessionError};
pub use store::{CredentialStore, StoreError, StoredCredentials};
pub use story::{Story, StoryId};
pub use story_list::StoryList;
pub use user::User;

pub use hns_api::{Client, Error as ApiError, NewStory};
