/// Application state and router builder
///
/// Defines the shared application state, the `CurrentUser` extractor,
/// and the function that assembles the axum router with all routes
/// and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use taskdeck_api::{app::AppState, config::Config};
/// use taskdeck_shared::auth::{gate::JwtAuthGate, jwt::TokenSigner};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let signer = TokenSigner::new(&config.jwt.secret);
/// let gate = Arc::new(JwtAuthGate::new(signer.clone(), pool.clone()));
/// let state = AppState::new(pool, config, signer, gate);
/// let app = taskdeck_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError, routes};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskdeck_shared::{
    auth::{gate::AuthGate, jwt::TokenSigner},
    models::user::User,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor.
/// The signer and gate are constructed once at startup; nothing here
/// is mutated after that.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Token issuer/verifier
    pub signer: TokenSigner,

    /// Authentication gate; swappable with a stub in tests
    pub auth_gate: Arc<dyn AuthGate>,
}

impl AppState {
    /// Creates new application state
    pub fn new(
        db: PgPool,
        config: Config,
        signer: TokenSigner,
        auth_gate: Arc<dyn AuthGate>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            signer,
            auth_gate,
        }
    }
}

/// The authenticated user, resolved by the gate
///
/// Any handler taking this parameter requires a valid bearer token;
/// extraction fails with 401 otherwise.
///
/// # Example
///
/// ```ignore
/// async fn handler(CurrentUser(user): CurrentUser) -> String {
///     format!("Hello, {}!", user.username)
/// }
/// ```
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        let user = state.auth_gate.authenticate(authorization).await?;

        Ok(CurrentUser(user))
    }
}

/// Builds the complete axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── GET  /health                                # public
/// ├── POST /users/register                        # public
/// ├── POST /users/login                           # public
/// ├── POST   /tasks/user/:user_id                 # auth
/// ├── GET    /tasks/user/:user_id                 # auth
/// ├── PUT    /tasks/user/:user_id/task/:task_id   # auth
/// └── DELETE /tasks/user/:user_id/task/:task_id   # auth
/// ```
///
/// Authentication is enforced per handler through the [`CurrentUser`]
/// extractor rather than a router layer, so the gate stays an
/// injectable capability.
pub fn build_router(state: AppState) -> Router {
    let user_routes = Router::new()
        .route("/register", post(routes::users::register))
        .route("/login", post(routes::users::login));

    let task_routes = Router::new()
        .route(
            "/user/:user_id",
            post(routes::tasks::create_task).get(routes::tasks::list_tasks),
        )
        .route(
            "/user/:user_id/task/:task_id",
            axum::routing::put(routes::tasks::update_task).delete(routes::tasks::delete_task),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/users", user_routes)
        .nest("/tasks", task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // The browser frontend is served from another origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
