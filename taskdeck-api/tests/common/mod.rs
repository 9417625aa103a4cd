/// Common test utilities for integration tests
///
/// Shared infrastructure for exercising the full router:
/// - database setup and migrations
/// - application state with the real JWT gate
/// - request helpers (JSON in, status + JSON out)
/// - unique username generation so tests can share a database
///
/// Tests are skipped when `DATABASE_URL` is not set; everything else
/// here panics loudly, since a partially working test environment is
/// worse than none.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use sqlx::PgPool;
use taskdeck_api::app::{build_router, AppState};
use taskdeck_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use taskdeck_shared::auth::gate::JwtAuthGate;
use taskdeck_shared::auth::jwt::TokenSigner;
use tower::ServiceExt;

/// Signing secret used by every test context
pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-32-bytes!";

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Test context containing the router and its backing resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub signer: TokenSigner,
}

impl TestContext {
    /// Creates a test context, or `None` when `DATABASE_URL` is unset
    pub async fn try_new() -> Option<Self> {
        let database_url = std::env::var("DATABASE_URL").ok()?;

        let db = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        // Path relative to this crate's Cargo.toml
        sqlx::migrate!("../taskdeck-shared/migrations")
            .run(&db)
            .await
            .expect("Failed to run migrations");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
            jwt: JwtConfig {
                secret: TEST_JWT_SECRET.to_string(),
            },
        };

        let signer = TokenSigner::new(&config.jwt.secret);
        let gate = Arc::new(JwtAuthGate::new(signer.clone(), db.clone()));
        let state = AppState::new(db.clone(), config, signer.clone(), gate);

        Some(Self {
            db,
            app: build_router(state),
            signer,
        })
    }

    /// Sends a request and returns (status, parsed JSON body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
        token: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };

        (status, json)
    }

    /// Generates a username no other test run will have used
    pub fn unique_username(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        format!("{}_{}_{}_{}", prefix, std::process::id(), nanos, n)
    }

    /// Registers a user and returns their id
    pub async fn register(&self, username: &str, password: &str) -> i64 {
        let (status, body) = self
            .request(
                "POST",
                "/users/register",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        body["id"].as_i64().expect("register response has an id")
    }

    /// Logs a user in and returns the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/users/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        assert_eq!(body["token_type"], "bearer");
        body["access_token"]
            .as_str()
            .expect("login response has a token")
            .to_string()
    }

    /// Registers and logs in a fresh user; returns (id, token)
    pub async fn signup(&self, prefix: &str) -> (i64, String) {
        let username = Self::unique_username(prefix);
        let id = self.register(&username, "pw1").await;
        let token = self.login(&username, "pw1").await;
        (id, token)
    }
}

/// Skips the current test when no database is configured
#[macro_export]
macro_rules! require_db {
    () => {
        match common::TestContext::try_new().await {
            Some(ctx) => ctx,
            None => {
                eprintln!("skipping: DATABASE_URL not set");
                return;
            }
        }
    };
}
