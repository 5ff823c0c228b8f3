/// JSON-file storage backend
///
/// Persists each collection as one pretty-printed JSON array in its own
/// file under a data directory (`users.json`, `tasks.json`). Every save
/// rewrites the whole file; a missing file loads as an empty collection.

use super::{StorageBackend, StoreError};
use crate::models::{task::Task, user::User};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

const USERS_FILE: &str = "users.json";
const TASKS_FILE: &str = "tasks.json";

/// File-backed storage under a data directory
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Creates a backend rooted at `data_dir`
    ///
    /// Call [`FileBackend::init`] before serving requests to make sure
    /// the directory and empty collection files exist.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Creates the data directory and empty collection files if absent
    pub async fn init(&self) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir).await?;

        for name in [USERS_FILE, TASKS_FILE] {
            let path = self.data_dir.join(name);
            if fs::metadata(&path).await.is_err() {
                fs::write(&path, b"[]").await?;
            }
        }

        Ok(())
    }

    fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(TASKS_FILE)
    }

    async fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
        let data = match fs::read_to_string(path).await {
            Ok(data) => data,
            // A collection that was never written is just empty
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&data)?)
    }

    async fn save_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(items)?;
        fs::write(path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Self::load_collection(&self.users_path()).await
    }

    async fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        Self::save_collection(&self.users_path(), users).await
    }

    async fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Self::load_collection(&self.tasks_path()).await
    }

    async fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        Self::save_collection(&self.tasks_path(), tasks).await
    }
}
