/// Health check endpoint
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
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use devconnector_shared::db::pool;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the database is unreachable
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports service status and database connectivity
///
/// Always answers 200 so load balancers can tell a degraded instance from
/// a dead one.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let connected = match pool::health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    }))
}
