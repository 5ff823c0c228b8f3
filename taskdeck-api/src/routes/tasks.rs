/// Task endpoints
///
/// All handlers here are behind the bearer-token middleware and scope
/// every operation to the authenticated user's id taken from the token
/// claims, never from request input.
///
/// # Endpoints
///
/// - `GET /api/tasks` - List the caller's tasks
/// - `POST /api/tasks` - Create a task
/// - `PUT /api/tasks/:id` - Partial update
/// - `DELETE /api/tasks/:id` - Delete one task
/// - `DELETE /api/tasks` - Delete all of the caller's completed tasks
///
/// # Enum coercion
///
/// Priority and status arrive as raw strings and are coerced at this
/// boundary: on create, anything outside the enumerated sets falls back
/// to the defaults (low/todo); on update, an unrecognized priority falls
/// back to low while an unrecognized status is dropped entirely,
/// retaining the stored value.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use taskdeck_shared::{
    auth::middleware::AuthUser,
    models::task::{CreateTask, Priority, Status, Task, UpdateTask},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text (required, non-empty after trimming)
    #[serde(default)]
    pub text: String,

    /// Priority; unrecognized values fall back to "low"
    pub priority: Option<String>,

    /// Workflow status; unrecognized values fall back to "todo"
    pub status: Option<String>,
}

/// Update task request; any subset of the mutable fields
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    /// New text
    pub text: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New priority; unrecognized values fall back to "low"
    pub priority: Option<String>,

    /// New status; unrecognized values are dropped (prior value kept)
    pub status: Option<String>,
}

/// Confirmation message response
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable confirmation
    pub message: String,
}

/// Lists every task owned by the caller
///
/// No pagination and no ordering contract beyond stable storage order.
pub async fn list_tasks(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<Vec<Task>>> {
    let tasks = Task::list_for_user(&state.store, auth.id).await?;
    Ok(Json(tasks))
}

/// Creates a task for the caller
///
/// # Errors
///
/// - `400 Bad Request`: text empty after trimming
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err(ApiError::BadRequest("Task text is required".to_string()));
    }

    let data = CreateTask {
        text: text.to_string(),
        priority: req
            .priority
            .as_deref()
            .map(Priority::parse_or_default)
            .unwrap_or_default(),
        status: req
            .status
            .as_deref()
            .map(Status::parse_or_default)
            .unwrap_or_default(),
    };

    let task = Task::create(&state.store, auth.id, data).await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Applies a partial update to one of the caller's tasks
///
/// Only fields present in the request are touched; an omitted status
/// preserves the stored status rather than resetting it.
///
/// # Errors
///
/// - `404 Not Found`: no task with that id owned by the caller
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let changes = UpdateTask {
        text: req.text,
        completed: req.completed,
        // Invalid priority resets to the default, as on create
        priority: req.priority.as_deref().map(Priority::parse_or_default),
        // Invalid status is dropped entirely, retaining the prior value
        status: req.status.as_deref().and_then(Status::parse),
    };

    let task = Task::update(&state.store, auth.id, id, changes)
        .await?
        .ok_or_else(|| ApiError::NotFound("Task not found".to_string()))?;

    Ok(Json(task))
}

/// Deletes one of the caller's tasks
///
/// # Errors
///
/// - `404 Not Found`: no task with that id owned by the caller
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    let deleted = Task::delete(&state.store, auth.id, id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Task not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Deletes every completed task owned by the caller
///
/// Always succeeds; removing nothing is a valid outcome.
pub async fn delete_completed(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let removed = Task::delete_completed(&state.store, auth.id).await?;
    tracing::debug!(user_id = %auth.id, removed, "cleared completed tasks");

    Ok(Json(MessageResponse {
        message: "Completed tasks deleted successfully".to_string(),
    }))
}
