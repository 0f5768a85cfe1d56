use axum::{extract::State, response::Json};
use serde_json::{json, Value};

use crate::{database, error::ApiError, AppState};

/// GET /api/health - Full health check including database connectivity
pub async fn health_check(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    database::health_check(&app_state.db_pool).await?;

    Ok(Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

/// GET /api/health/live - Liveness probe, no dependencies checked
pub async fn liveness_check() -> Json<Value> {
    Json(json!({ "status": "alive" }))
}

/// GET /api/health/ready - Readiness probe, database must answer
pub async fn readiness_check(State(app_state): State<AppState>) -> Result<Json<Value>, ApiError> {
    database::health_check(&app_state.db_pool).await?;

    Ok(Json(json!({ "status": "ready" })))
}
