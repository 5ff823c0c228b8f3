/// Data models for TaskDeck
///
/// This module contains the persisted record types and their store-backed
/// operations.
///
/// # Models
///
/// - `user`: User accounts and their public projection
/// - `task`: Tasks with priority and workflow status
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::user::{User, CreateUser};
/// use taskdeck_shared::store::{MemoryBackend, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::new(MemoryBackend::new());
///
/// let new_user = CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// };
///
/// let user = User::create(&store, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
