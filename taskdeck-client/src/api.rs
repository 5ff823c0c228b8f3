/// TaskDeck API client
///
/// A typed client over the server's JSON API. Every request carries the
/// cached session token when one exists; any 401/403 response clears the
/// cache and surfaces as [`ClientError::SessionExpired`], which callers
/// treat as a forced logout.
///
/// # Example
///
/// ```no_run
/// use taskdeck_client::api::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let mut client = ApiClient::new("http://localhost:3000", "./session.json").await?;
///
/// client.register("alice", "alice@example.com", "secret1").await?;
/// let task = client.create_task("buy milk", None, None).await?;
/// client.delete_task(task.id).await?;
/// # Ok(())
/// # }
/// ```

use crate::session::{Session, SessionCache, SessionError};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use taskdeck_shared::models::task::{Priority, Status, Task};
use taskdeck_shared::models::user::PublicUser;
use uuid::Uuid;

/// Error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the session token; the cache has been cleared
    #[error("Session expired. Please login again.")]
    SessionExpired,

    /// The server returned an error response
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: StatusCode,
        /// Server-provided message
        message: String,
    },

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Session cache failure
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[allow(dead_code)]
    error: String,
    message: String,
}

/// Register/login response
#[derive(Debug, Deserialize)]
struct AuthResponse {
    token: String,
    user: PublicUser,
}

/// Partial task update, mirroring `PUT /api/tasks/:id`
///
/// `None` fields are omitted from the request body, so the server leaves
/// them untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskPatch {
    /// New text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// New completion flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,

    /// New priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// New workflow status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

/// API client with a persistent session
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    cache: SessionCache,
    session: Option<Session>,
}

impl ApiClient {
    /// Creates a client, restoring any cached session
    pub async fn new(
        base_url: impl Into<String>,
        session_path: impl AsRef<Path>,
    ) -> Result<Self, ClientError> {
        let cache = SessionCache::new(session_path.as_ref());
        let session = cache.load().await?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cache,
            session,
        })
    }

    /// The logged-in user, if a session exists
    pub fn current_user(&self) -> Option<&PublicUser> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Whether a session token is held
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Registers a new account and stores the returned session
    pub async fn register(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<PublicUser, ClientError> {
        let auth: AuthResponse = self
            .send(
                self.request(Method::POST, "/api/register").json(&serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                })),
            )
            .await?;

        self.store_session(auth).await
    }

    /// Logs in and stores the returned session
    pub async fn login(&mut self, email: &str, password: &str) -> Result<PublicUser, ClientError> {
        let auth: AuthResponse = self
            .send(
                self.request(Method::POST, "/api/login").json(&serde_json::json!({
                    "email": email,
                    "password": password,
                })),
            )
            .await?;

        self.store_session(auth).await
    }

    /// Discards the session locally
    ///
    /// The token itself stays valid on the server until it expires;
    /// logout only forgets it.
    pub async fn logout(&mut self) -> Result<(), ClientError> {
        self.session = None;
        self.cache.clear().await?;
        Ok(())
    }

    /// Fetches the current user, confirming the account still exists
    pub async fn me(&mut self) -> Result<PublicUser, ClientError> {
        self.send(self.request(Method::GET, "/api/me")).await
    }

    /// Lists the caller's tasks
    pub async fn list_tasks(&mut self) -> Result<Vec<Task>, ClientError> {
        self.send(self.request(Method::GET, "/api/tasks")).await
    }

    /// Creates a task
    pub async fn create_task(
        &mut self,
        text: &str,
        priority: Option<Priority>,
        status: Option<Status>,
    ) -> Result<Task, ClientError> {
        self.send(
            self.request(Method::POST, "/api/tasks").json(&serde_json::json!({
                "text": text,
                "priority": priority.unwrap_or_default(),
                "status": status.unwrap_or_default(),
            })),
        )
        .await
    }

    /// Applies a partial update to a task
    pub async fn update_task(&mut self, id: Uuid, patch: TaskPatch) -> Result<Task, ClientError> {
        self.send(
            self.request(Method::PUT, &format!("/api/tasks/{}", id))
                .json(&patch),
        )
        .await
    }

    /// Toggles a task's completion flag
    pub async fn set_completed(&mut self, id: Uuid, completed: bool) -> Result<Task, ClientError> {
        self.update_task(
            id,
            TaskPatch {
                completed: Some(completed),
                ..Default::default()
            },
        )
        .await
    }

    /// Moves a task to another workflow column
    pub async fn set_status(&mut self, id: Uuid, status: Status) -> Result<Task, ClientError> {
        self.update_task(
            id,
            TaskPatch {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    /// Deletes one task
    pub async fn delete_task(&mut self, id: Uuid) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .send(self.request(Method::DELETE, &format!("/api/tasks/{}", id)))
            .await?;
        Ok(())
    }

    /// Deletes every completed task
    pub async fn clear_completed(&mut self) -> Result<(), ClientError> {
        let _: serde_json::Value = self.send(self.request(Method::DELETE, "/api/tasks")).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(session) = &self.session {
            builder = builder.bearer_auth(&session.token);
        }
        builder
    }

    async fn store_session(&mut self, auth: AuthResponse) -> Result<PublicUser, ClientError> {
        let session = Session {
            token: auth.token,
            user: auth.user.clone(),
        };
        self.cache.save(&session).await?;
        self.session = Some(session);
        Ok(auth.user)
    }

    /// Sends a request, mapping auth rejections and error bodies
    async fn send<T: DeserializeOwned>(
        &mut self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            // Token expired or invalid: forget it, force a fresh login
            tracing::debug!(%status, "session rejected, clearing cache");
            self.session = None;
            self.cache.clear().await?;
            return Err(ClientError::SessionExpired);
        }

        if !status.is_success() {
            let message = match response.json::<ApiErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => format!("Request failed with status {}", status),
            };
            return Err(ClientError::Api { status, message });
        }

        Ok(response.json().await?)
    }
}
