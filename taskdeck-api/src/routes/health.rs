/// Health check endpoint
///
/// Reuses the pool's health probe, so this reports exactly what the
/// startup connectivity check would. The endpoint always answers 200;
/// a broken database shows up in the body, not the status code, so
/// load balancers keep routing while operators see the degradation.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use taskdeck_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status: "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status: "connected" or "disconnected"
    pub database: String,
}

impl HealthResponse {
    /// Builds the response from the database probe outcome
    fn from_probe(database_reachable: bool) -> Self {
        let (status, database) = if database_reachable {
            ("healthy", "connected")
        } else {
            ("degraded", "disconnected")
        };

        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            database: database.to_string(),
        }
    }
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_reachable = pool::health_check(&state.db).await.is_ok();

    Json(HealthResponse::from_probe(database_reachable))
}
