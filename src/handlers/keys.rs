//! API key HTTP handlers.
//!
//! This module implements the API key endpoints:
//! - GET /api/keys - List stored keys with secrets decrypted
//! - POST /api/keys - Encrypt and store a new key
//! - DELETE /api/keys/{id} - Remove a key
//!
//! All three sit behind the session guard.

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
        api_key::{ApiKeyResponse, CreateApiKeyRequest},
    },
    services::api_key_service,
};

/// List all stored API keys, newest first.
///
/// # Response
///
/// - **Success (200 OK)**: array of keys (may be empty)
/// - **Error (401)**: no authenticated session
/// - **Error (500)**: store unreachable or a key failed to decrypt
///
/// ```json
/// [
///   {
///     "_id": "550e8400-e29b-41d4-a716-446655440000",
///     "name": "OpenAI",
///     "description": "",
///     "apiKey": "sk-test-123",
///     "createdAt": "2025-12-20T10:00:00Z"
///   }
/// ]
/// ```
pub async fn list_keys(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiKeyResponse>>, AppError> {
    let keys = api_key_service::list_api_keys(state.store.as_ref(), &state.cipher).await?;

    Ok(Json(keys))
}

/// Store a new API key.
///
/// # Request Body
///
/// ```json
/// { "name": "OpenAI", "description": "optional", "apiKey": "sk-test-123" }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "message": ..., "data": {...}}` with the
///   plaintext key echoed back
/// - **Error (400)**: name or API key missing
pub async fn create_key(
    State(state): State<AppState>,
    payload: Result<Json<CreateApiKeyRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ApiKeyResponse>>, AppError> {
    let Json(request) = payload?;
    let key = api_key_service::create_api_key(state.store.as_ref(), &state.cipher, request).await?;

    Ok(Json(ApiResponse::with_data("API key added successfully", key)))
}

/// Delete an API key.
///
/// Succeeds whether or not the id exists. An id that is not a UUID cannot name a
/// stored record, so it is treated the same way.
pub async fn delete_key(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if let Ok(id) = Uuid::parse_str(&id) {
        api_key_service::delete_api_key(state.store.as_ref(), id).await?;
    }

    Ok(Json(ApiResponse::message("API key deleted successfully")))
}
