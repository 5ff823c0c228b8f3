/// User model and store operations
///
/// This module provides the User record and the operations the auth
/// endpoints need. Users are created on registration and never mutated
/// or deleted afterwards.
///
/// # Storage layout
///
/// One JSON object per user in the `users.json` array:
///
/// ```json
/// {
///   "id": "4ceb2b30-...",
///   "username": "alice",
///   "email": "alice@example.com",
///   "passwordHash": "$argon2id$...",
///   "createdAt": "2024-01-01T00:00:00Z"
/// }
/// ```
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
/// let user = User::create(&store, CreateUser {
///     username: "alice".to_string(),
///     email: "alice@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
/// }).await?;
///
/// let found = User::find_by_email(&store, "alice@example.com").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use crate::store::{Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for user operations
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    /// A user with this email already exists
    #[error("User with this email already exists")]
    EmailTaken,

    /// The username is already taken
    #[error("Username already taken")]
    UsernameTaken,

    /// Underlying storage failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// User account record
///
/// Passwords are stored as Argon2id hashes, never in plaintext, and the
/// hash never leaves the server: API responses use [`PublicUser`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Username, unique across all users
    pub username: String,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id password hash
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username (must be unique)
    pub username: String,

    /// Email address (must be unique)
    pub email: String,

    /// Argon2id password hash (NOT the plaintext password!)
    pub password_hash: String,
}

/// Public projection of a user, safe to return to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    /// Unique user ID
    pub id: Uuid,

    /// Username
    pub username: String,

    /// Email address
    pub email: String,
}

impl User {
    /// Creates a new user record
    ///
    /// Uniqueness of email and username is checked inside the store's
    /// mutation lock, so two racing registrations cannot both succeed.
    ///
    /// # Errors
    ///
    /// - [`UserError::EmailTaken`] if the email is already registered
    /// - [`UserError::UsernameTaken`] if the username is already in use
    /// - [`UserError::Store`] if storage fails
    pub async fn create(store: &Store, data: CreateUser) -> Result<Self, UserError> {
        let _guard = store.write_guard().await;

        let mut users = store.backend().load_users().await?;

        if users.iter().any(|u| u.email == data.email) {
            return Err(UserError::EmailTaken);
        }
        if users.iter().any(|u| u.username == data.username) {
            return Err(UserError::UsernameTaken);
        }

        let user = Self {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            password_hash: data.password_hash,
            created_at: Utc::now(),
        };

        users.push(user.clone());
        store.backend().save_users(&users).await?;

        Ok(user)
    }

    /// Finds a user by ID
    pub async fn find_by_id(store: &Store, id: Uuid) -> Result<Option<Self>, StoreError> {
        let users = store.backend().load_users().await?;
        Ok(users.into_iter().find(|u| u.id == id))
    }

    /// Finds a user by email address
    pub async fn find_by_email(store: &Store, email: &str) -> Result<Option<Self>, StoreError> {
        let users = store.backend().load_users().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    /// The public projection (id, username, email; never the hash)
    pub fn public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}
