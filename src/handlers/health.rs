//! `GET /health` - liveness plus a store round trip. No session required.

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{app::AppState, error::AppError};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Report healthy once the record store answers.
///
/// ```json
/// { "status": "healthy", "store": "connected", "timestamp": "2025-12-21T19:00:00Z" }
/// ```
///
/// A store failure surfaces as the usual 500 error body.
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.ping().await?;

    Ok(Json(HealthResponse {
        status: "healthy",
        store: "connected",
        timestamp: Utc::now(),
    }))
}
