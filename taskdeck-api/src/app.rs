/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskdeck_api::{app::AppState, config::Config};
/// use taskdeck_shared::store::{FileBackend, Store};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let backend = FileBackend::new(&config.storage.data_dir);
/// backend.init().await?;
/// let state = AppState::new(Store::new(backend), config);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use taskdeck_shared::auth::{jwt, middleware::AuthUser};
use taskdeck_shared::store::Store;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::Config;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning.
#[derive(Clone)]
pub struct AppState {
    /// Storage handle
    pub store: Arc<Store>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(store: Store, config: Config) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Gets the secret for session token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                    # Health check (public)
/// └── /api/
///     ├── POST   /register       # Create account (public)
///     ├── POST   /login          # Authenticate (public)
///     ├── GET    /me             # Current user (bearer token)
///     ├── GET    /tasks          # List caller's tasks
///     ├── POST   /tasks          # Create task
///     ├── PUT    /tasks/:id      # Partial update
///     ├── DELETE /tasks/:id      # Delete one task
///     └── DELETE /tasks          # Delete caller's completed tasks
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer-token authentication (task routes and /me only)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no auth required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Everything below requires a valid bearer token
    let protected_routes = Router::new()
        .route("/me", get(routes::auth::me))
        .route("/tasks", get(routes::tasks::list_tasks))
        .route("/tasks", post(routes::tasks::create_task))
        .route("/tasks", delete(routes::tasks::delete_completed))
        .route("/tasks/:id", put(routes::tasks::update_task))
        .route("/tasks/:id", delete(routes::tasks::delete_task))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    let api_routes = Router::new().merge(auth_routes).merge(protected_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    Router::new()
        .merge(health_routes)
        .nest("/api", api_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Extracts and validates the session token from the Authorization
/// header, then injects [`AuthUser`] into request extensions. The claims
/// are trusted as-is; user existence is not re-checked here.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    // Missing header or non-Bearer scheme: 401, same as no token at all
    let token = auth_header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Access token required".to_string())
        })?;

    // Malformed or expired token: 403 via From<JwtError>
    let claims = jwt::validate_token(token, state.jwt_secret())?;

    req.extensions_mut().insert(AuthUser::from_claims(&claims));

    Ok(next.run(req).await)
}
