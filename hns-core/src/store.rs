//! Local persistence of the session credential.
//!
//! Only the token and username survive a restart. They live in a small JSON
//! file, written after a successful login or signup and removed on logout.

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::config::{ClientConfig, ConfigError};

/// File name used inside a data directory.
pub const CREDENTIALS_FILE: &str = "credentials.json";

/// The file holds a bearer token; only the owner may read it.
#[cfg(unix)]
const CREDENTIALS_MODE: u32 = 0o600;

/// Errors from credential persistence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The persisted `token` and `username` entries.
///
/// Either entry may be missing from the file; it then loads as empty, which
/// session restore treats as "not logged in".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(default)]
    pub token: String,

    #[serde(default)]
    pub username: String,
}

/// Credential file at a fixed path.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store backed by the given file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store backed by [`CREDENTIALS_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::at(dir.as_ref().join(CREDENTIALS_FILE))
    }

    /// Store in `HNS_DATA_DIR`, or the platform data directory when unset.
    pub fn default_location() -> Result<Self, ConfigError> {
        Self::location_from(|key| std::env::var(key).ok())
    }

    fn location_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        ClientConfig::from_lookup(lookup)?.credential_store()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read stored credentials; `None` if nothing has been saved.
    pub async fn load(&self) -> Result<Option<StoredCredentials>, StoreError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Write credentials, creating the parent directory if needed.
    ///
    /// On unix the file is readable by its owner only.
    pub async fn save(&self, credentials: &StoredCredentials) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(credentials)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(CREDENTIALS_MODE);
        let mut file = options.open(&self.path).await?;

        // `mode` only applies on creation; tighten a file left by older runs
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(CREDENTIALS_MODE))
                .await?;
        }

        file.write_all(content.as_bytes()).await?;
        file.flush().await?;
        debug!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    /// Forget the stored credentials. Clearing an empty store is fine.
    pub async fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "credentials cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
