/// Task model and store operations
///
/// This module provides the Task record, the priority and workflow-status
/// enums, and the store-backed operations behind the task endpoints.
/// Every operation is scoped to an owning user; a task is never visible
/// to anyone but its owner.
///
/// # Workflow
///
/// ```text
/// todo → inprogress → done
/// ```
///
/// Status moves freely between the three columns; `completed` is an
/// independent flag toggled from the list view.
///
/// # Storage layout
///
/// One JSON object per task in the `tasks.json` array:
///
/// ```json
/// {
///   "id": "9f0c42a1-...",
///   "userId": "4ceb2b30-...",
///   "text": "buy milk",
///   "completed": false,
///   "priority": "low",
///   "status": "todo",
///   "createdAt": "2024-01-01T00:00:00Z"
/// }
/// ```
///
/// Records missing `priority` or `status` (written before those fields
/// existed) deserialize to the defaults.
///
/// # Example
///
/// ```no_run
/// use taskdeck_shared::models::task::{Task, CreateTask, Priority};
/// use taskdeck_shared::store::{MemoryBackend, Store};
/// use uuid::Uuid;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Store::new(MemoryBackend::new());
/// let user_id = Uuid::new_v4();
///
/// let task = Task::create(&store, user_id, CreateTask {
///     text: "buy milk".to_string(),
///     priority: Priority::High,
///     status: Default::default(),
/// }).await?;
///
/// let mine = Task::list_for_user(&store, user_id).await?;
/// assert_eq!(mine.len(), 1);
/// # Ok(())
/// # }
/// ```

use crate::store::{Store, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Low priority (the default)
    #[default]
    Low,

    /// Medium priority
    Medium,

    /// High priority
    High,
}

impl Priority {
    /// Parses a priority value, `None` for anything outside the set
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Parses a priority value, coercing anything unrecognized to `Low`
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// The wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Workflow column the task sits in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Not started (the default)
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Finished
    Done,
}

impl Status {
    /// Parses a status value, `None` for anything outside the set
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "inprogress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Parses a status value, coercing anything unrecognized to `Todo`
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }

    /// The wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }
}

/// Task record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Owning user ID
    ///
    /// Checked against the caller on every read and mutation. Assumed to
    /// reference an existing user at creation time, never re-validated.
    pub user_id: Uuid,

    /// Task text, non-empty after trimming
    pub text: String,

    /// Completion flag
    pub completed: bool,

    /// Priority, defaults to low
    #[serde(default)]
    pub priority: Priority,

    /// Workflow status, defaults to todo
    #[serde(default)]
    pub status: Status,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task
///
/// Text must already be trimmed and non-empty; enum coercion for raw
/// request values happens at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    /// Task text
    pub text: String,

    /// Priority (defaults to low)
    #[serde(default)]
    pub priority: Priority,

    /// Workflow status (defaults to todo)
    #[serde(default)]
    pub status: Status,
}

impl CreateTask {
    /// Creation input with default priority and status
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            priority: Priority::default(),
            status: Status::default(),
        }
    }
}

/// Partial update of a task
///
/// Only `Some` fields are applied; omitted fields keep their prior
/// value. An out-of-set status in a request never reaches this struct;
/// the API boundary drops it, retaining the stored status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    /// New text, trimmed before storing
    pub text: Option<String>,

    /// New completion flag
    pub completed: Option<bool>,

    /// New priority
    pub priority: Option<Priority>,

    /// New workflow status
    pub status: Option<Status>,
}

impl Task {
    /// Builds a task record from creation input, assigning id and timestamp
    pub fn from_create(user_id: Uuid, data: CreateTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            text: data.text,
            completed: false,
            priority: data.priority,
            status: data.status,
            created_at: Utc::now(),
        }
    }

    /// Lists every task owned by `user_id`, in stable storage order
    pub async fn list_for_user(store: &Store, user_id: Uuid) -> Result<Vec<Self>, StoreError> {
        let tasks = store.backend().load_tasks().await?;
        Ok(tasks.into_iter().filter(|t| t.user_id == user_id).collect())
    }

    /// Creates and persists a new task for `user_id`
    pub async fn create(
        store: &Store,
        user_id: Uuid,
        data: CreateTask,
    ) -> Result<Self, StoreError> {
        let _guard = store.write_guard().await;

        let mut tasks = store.backend().load_tasks().await?;
        let task = Self::from_create(user_id, data);
        tasks.push(task.clone());
        store.backend().save_tasks(&tasks).await?;

        Ok(task)
    }

    /// Applies a partial update to the caller's task with the given id
    ///
    /// Returns `Ok(None)` if no task with that id is owned by `user_id`.
    pub async fn update(
        store: &Store,
        user_id: Uuid,
        id: Uuid,
        changes: UpdateTask,
    ) -> Result<Option<Self>, StoreError> {
        let _guard = store.write_guard().await;

        let mut tasks = store.backend().load_tasks().await?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id && t.user_id == user_id) else {
            return Ok(None);
        };

        if let Some(text) = changes.text {
            task.text = text.trim().to_string();
        }
        if let Some(completed) = changes.completed {
            task.completed = completed;
        }
        if let Some(priority) = changes.priority {
            task.priority = priority;
        }
        if let Some(status) = changes.status {
            task.status = status;
        }

        let updated = task.clone();
        store.backend().save_tasks(&tasks).await?;

        Ok(Some(updated))
    }

    /// Deletes the caller's task with the given id
    ///
    /// Returns `false` if no task with that id is owned by `user_id`.
    pub async fn delete(store: &Store, user_id: Uuid, id: Uuid) -> Result<bool, StoreError> {
        let _guard = store.write_guard().await;

        let mut tasks = store.backend().load_tasks().await?;
        let Some(index) = tasks.iter().position(|t| t.id == id && t.user_id == user_id) else {
            return Ok(false);
        };

        tasks.remove(index);
        store.backend().save_tasks(&tasks).await?;

        Ok(true)
    }

    /// Removes every completed task owned by `user_id` in one pass
    ///
    /// Returns the number of tasks removed; zero is fine.
    pub async fn delete_completed(store: &Store, user_id: Uuid) -> Result<usize, StoreError> {
        let _guard = store.write_guard().await;

        let tasks = store.backend().load_tasks().await?;
        let before = tasks.len();
        let kept: Vec<Task> = tasks
            .into_iter()
            .filter(|t| !(t.user_id == user_id && t.completed))
            .collect();
        let removed = before - kept.len();
        store.backend().save_tasks(&kept).await?;

        Ok(removed)
    }
}
