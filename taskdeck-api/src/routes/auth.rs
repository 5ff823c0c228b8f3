/// Authentication endpoints
///
/// This module provides user authentication endpoints:
/// - Registration
/// - Login
/// - Current user lookup
///
/// # Endpoints
///
/// - `POST /api/register` - Register new user
/// - `POST /api/login` - Login and get a session token
/// - `GET /api/me` - Current user (requires bearer token)

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Json};
use taskdeck_shared::{
    auth::{jwt, middleware::AuthUser, password},
    models::user::{CreateUser, PublicUser, User},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Register request
///
/// Fields default to empty strings so a missing field and an empty field
/// report the same "All fields are required" error.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[serde(default)]
    pub username: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password (minimum 6 characters)
    #[serde(default)]
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    pub email: String,

    /// Password
    #[serde(default)]
    pub password: String,
}

/// Response for successful register/login
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Human-readable confirmation
    pub message: String,

    /// Signed session token, valid for 7 days
    pub token: String,

    /// Public user projection
    pub user: PublicUser,
}

/// Register a new user
///
/// Hashes the password with Argon2id, persists the user, and returns a
/// fresh session token alongside the public user projection.
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "alice@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing field, short password, or duplicate
///   email/username
/// - `500 Internal Server Error`: storage or hashing failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if req.username.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest("All fields are required".to_string()));
    }

    req.validate().map_err(|_| {
        ApiError::BadRequest("Password must be at least 6 characters".to_string())
    })?;

    let password_hash = password::hash_password(&req.password)?;

    // Duplicate email/username becomes a 400 conflict via From<UserError>
    let user = User::create(
        &state.store,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
        },
    )
    .await?;

    let claims = jwt::Claims::new(user.id, &user.username, &user.email);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.public(),
        }),
    ))
}

/// Login endpoint
///
/// Authenticates a user by email and password and returns a session token.
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// {
///   "email": "alice@example.com",
///   "password": "secret1"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing email or password
/// - `401 Unauthorized`: unknown email or wrong password, with an
///   identical message in both cases so callers cannot enumerate accounts
/// - `500 Internal Server Error`: storage failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }

    let user = User::find_by_email(&state.store, &req.email)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid email or password".to_string(),
        ));
    }

    let claims = jwt::Claims::new(user.id, &user.username, &user.email);
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.public(),
    }))
}

/// Current-user endpoint
///
/// Re-reads the user record by the token's subject to confirm it still
/// exists. The token itself does not self-invalidate when the record is
/// removed; this is the only endpoint that notices.
///
/// # Endpoint
///
/// ```text
/// GET /api/me
/// Authorization: Bearer <token>
/// ```
///
/// # Errors
///
/// - `404 Not Found`: the user record was removed after the token was issued
pub async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<PublicUser>> {
    let user = User::find_by_id(&state.store, auth.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.public()))
}
