/// Authentication utilities
///
/// This module provides the authentication primitives for TaskDeck:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: Session token generation and validation
/// - [`middleware`]: The authenticated-user request context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256-signed claims with a 7-day validity window
/// - **Constant-time Comparison**: Password verification is constant-time
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::auth::password::{hash_password, verify_password};
/// use taskdeck_shared::auth::jwt::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Session token generation
/// let claims = Claims::new(Uuid::new_v4(), "alice", "alice@example.com");
/// let token = create_token(&claims, "secret-key")?;
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod jwt;
pub mod middleware;
