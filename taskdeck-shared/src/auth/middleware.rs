/// Authenticated-user request context
///
/// This module provides the request context injected by the API server's
/// bearer-token middleware. After the middleware validates the session
/// token it inserts an [`AuthUser`] into the request extensions; handlers
/// extract it as an argument.
///
/// The context is built entirely from token claims. Task handlers trust
/// it without a storage lookup; only `GET /api/me` re-checks that the
/// user record still exists.
///
/// # Example
///
/// ```
/// use taskdeck_shared::auth::middleware::AuthUser;
///
/// async fn protected_handler(auth: AuthUser) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use super::jwt::Claims;

/// Authentication context added to request extensions
///
/// Carries the caller's identity as embedded in their session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// Authenticated user ID
    pub id: Uuid,

    /// Username from token claims
    pub username: String,

    /// Email from token claims
    pub email: String,
}

impl AuthUser {
    /// Builds the auth context from validated token claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username.clone(),
            email: claims.email.clone(),
        }
    }
}

/// Extracts [`AuthUser`] from request extensions
///
/// Fails with 401 if the auth middleware did not run for this route.
/// The rejection body carries the same `{error, message}` shape as
/// every other error response.
#[async_trait::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "unauthorized",
                    "message": "Access token required",
                })),
            )
        })
    }
}
