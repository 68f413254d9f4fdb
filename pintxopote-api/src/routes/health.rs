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
///   "status": "OK",
///   "data": { "status": "healthy", "version": "0.1.0", "database": "connected" }
/// }
/// ```

use axum::extract::State;
use pintxopote_shared::db::pool;
use serde::{Deserialize, Serialize};

use super::{ok, Reply};
use crate::{app::AppState, error::ApiResult};

/// Health check payload
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,
}

/// Reports service health, probing the database
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Reply<HealthResponse>> {
    let connected = pool::health_check(&state.db).await.is_ok();

    Ok(ok(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
    }))
}
