/// On-disk session cache
///
/// Persists the session token and public user projection to a JSON file
/// so a login survives process restarts. The cache is cleared whenever
/// the server answers 401/403.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use taskdeck_shared::models::user::PublicUser;
use tokio::fs;

/// Error type for session cache operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Cache file could not be read or written
    #[error("Session cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Cache file contents could not be parsed
    #[error("Session cache parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A cached session: the bearer token plus who it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Signed session token
    pub token: String,

    /// Public user projection returned at login
    pub user: PublicUser,
}

/// File-backed store for the current session
#[derive(Debug, Clone)]
pub struct SessionCache {
    path: PathBuf,
}

impl SessionCache {
    /// Creates a cache at the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the cached session, if any
    ///
    /// A missing file means "not logged in", not an error. A corrupt
    /// file is treated the same way after clearing it.
    pub async fn load(&self) -> Result<Option<Session>, SessionError> {
        let data = match fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str(&data) {
            Ok(session) => Ok(Some(session)),
            Err(_) => {
                // Unreadable cache is as good as no cache
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Persists a session
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_vec_pretty(session)?;
        fs::write(&self.path, data).await?;
        Ok(())
    }

    /// Removes the cached session; absent file is fine
    pub async fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
