//! Hackathon HTTP handlers.
//!
//! - GET /api/hackathons - List hackathons, newest first
//! - POST /api/hackathons - Create
//! - PUT /api/hackathons/{id} - Replace all fields
//! - DELETE /api/hackathons/{id} - Remove
//!
//! The client picks POST or PUT from its own editing state; the server treats them
//! as independent operations.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use uuid::Uuid;

use crate::{
    app::AppState,
    error::AppError,
    models::{
        ApiResponse,
        hackathon::{HackathonFields, HackathonRecord},
    },
    services::hackathon_service,
};

/// List all hackathons. Unset fields are present as empty strings.
pub async fn list_hackathons(
    State(state): State<AppState>,
) -> Result<Json<Vec<HackathonRecord>>, AppError> {
    let hackathons = hackathon_service::list_hackathons(state.store.as_ref()).await?;

    Ok(Json(hackathons))
}

/// Create a hackathon.
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "message": ..., "data": record}`
/// - **Error (400)**: `hackathon_name` empty
pub async fn create_hackathon(
    State(state): State<AppState>,
    payload: Result<Json<HackathonFields>, JsonRejection>,
) -> Result<Json<ApiResponse<HackathonRecord>>, AppError> {
    let Json(fields) = payload?;
    let record = hackathon_service::create_hackathon(state.store.as_ref(), fields).await?;

    Ok(Json(ApiResponse::with_data(
        "Hackathon added successfully",
        record,
    )))
}

/// Update a hackathon.
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "message": ..., "data": record}`
/// - **Error (400)**: `hackathon_name` empty
/// - **Error (404)**: unknown or malformed id
pub async fn update_hackathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<HackathonFields>, JsonRejection>,
) -> Result<Json<ApiResponse<HackathonRecord>>, AppError> {
    let id = Uuid::parse_str(&id).map_err(|_| AppError::HackathonNotFound)?;
    let Json(fields) = payload?;
    let record = hackathon_service::update_hackathon(state.store.as_ref(), id, fields).await?;

    Ok(Json(ApiResponse::with_data(
        "Hackathon updated successfully",
        record,
    )))
}

/// Delete a hackathon. Unknown and malformed ids succeed.
pub async fn delete_hackathon(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if let Ok(id) = Uuid::parse_str(&id) {
        hackathon_service::delete_hackathon(state.store.as_ref(), id).await?;
    }

    Ok(Json(ApiResponse::message("Hackathon deleted successfully")))
}
