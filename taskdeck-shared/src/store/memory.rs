/// In-memory storage backend
///
/// Keeps each collection in a `RwLock<Vec<_>>`. Used by the test suites
/// and anywhere a throwaway store is handy. Same whole-collection
/// load/save contract as the file backend.

use super::{StorageBackend, StoreError};
use crate::models::{task::Task, user::User};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Volatile storage, one `Vec` per collection
#[derive(Debug, Default)]
pub struct MemoryBackend {
    users: RwLock<Vec<User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn save_users(&self, users: &[User]) -> Result<(), StoreError> {
        *self.users.write().await = users.to_vec();
        Ok(())
    }

    async fn load_tasks(&self) -> Result<Vec<Task>, StoreError> {
        Ok(self.tasks.read().await.clone())
    }

    async fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError> {
        *self.tasks.write().await = tasks.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::task::CreateTask;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_starts_empty() {
        let backend = MemoryBackend::new();
        assert!(backend.load_users().await.unwrap().is_empty());
        assert!(backend.load_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_replaces_collection() {
        let backend = MemoryBackend::new();
        let user_id = Uuid::new_v4();

        let first = Task::from_create(user_id, CreateTask::new("one"));
        backend.save_tasks(&[first]).await.unwrap();

        let second = Task::from_create(user_id, CreateTask::new("two"));
        backend.save_tasks(std::slice::from_ref(&second)).await.unwrap();

        let tasks = backend.load_tasks().await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "two");
    }
}
