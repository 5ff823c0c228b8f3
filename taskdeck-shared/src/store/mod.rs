/// Storage layer for users and tasks
///
/// Persistence in TaskDeck is deliberately simple: each collection is
/// loaded whole, mutated in memory, and written back whole. The
/// [`StorageBackend`] trait captures exactly that contract so business
/// logic never touches files directly and tests can swap in an in-memory
/// backend.
///
/// # Backends
///
/// - [`FileBackend`]: one JSON array per collection on disk (production)
/// - [`MemoryBackend`]: `RwLock<Vec<_>>` per collection (tests)
///
/// # Mutation serialization
///
/// A whole-collection rewrite is a read-modify-write cycle, so two
/// concurrent mutations could each load the same snapshot and one write
/// would be lost. [`Store`] closes that race with a single mutex that
/// every mutation holds across its load/save cycle. Readers do not take
/// the lock.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::store::{FileBackend, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = FileBackend::new("./data");
/// backend.init().await?;
/// let store = Store::new(backend);
/// # Ok(())
/// # }
/// ```

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::models::{task::Task, user::User};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be parsed or encoded
    #[error("Storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Whole-collection load/save interface
///
/// `load_*` returns the entire collection; `save_*` replaces it. There
/// are no partial writes and no transactions. Callers that mutate must
/// serialize their load/save cycle through [`Store::write_guard`].
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Loads every user record
    async fn load_users(&self) -> Result<Vec<User>, StoreError>;

    /// Replaces the user collection
    async fn save_users(&self, users: &[User]) -> Result<(), StoreError>;

    /// Loads every task record
    async fn load_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Replaces the task collection
    async fn save_tasks(&self, tasks: &[Task]) -> Result<(), StoreError>;
}

/// Shared handle over a storage backend
///
/// Pairs the backend with the mutation mutex. Model operations
/// (`User::create`, `Task::update`, ...) take `&Store` and use
/// [`Store::write_guard`] around every read-modify-write cycle.
pub struct Store {
    backend: Arc<dyn StorageBackend>,
    write_lock: Mutex<()>,
}

impl Store {
    /// Creates a store over the given backend
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    /// Access to the underlying backend
    pub fn backend(&self) -> &dyn StorageBackend {
        self.backend.as_ref()
    }

    /// Acquires the mutation lock
    ///
    /// Hold the returned guard for the full load-mutate-save cycle.
    pub async fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    /// Probes the backend, for health reporting
    pub async fn ping(&self) -> bool {
        self.backend.load_users().await.is_ok()
    }
}
