//! Login, logout and session status handlers.
//!
//! - POST /api/login - Check the operator credentials and mark the session
//! - POST /api/logout - Destroy the session
//! - GET /api/auth-status - Report whether the session is authenticated

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use tower_sessions::Session;

use crate::{
    app::AppState,
    error::AppError,
    middleware::auth::{SESSION_AUTH_KEY, is_authenticated},
    models::{
        ApiResponse,
        auth::{AuthStatus, LoginRequest},
    },
};

/// Log the operator in.
///
/// # Request Body
///
/// ```json
/// { "email": "me@example.com", "password": "..." }
/// ```
///
/// # Response
///
/// - **Success (200 OK)**: `{"success": true, "message": "Login successful"}`
/// - **Error (401)**: `{"success": false, "error": "Invalid credentials"}`
///
/// The session id is rotated before the flag is set. A failed attempt leaves the
/// session untouched. An unreadable body counts as a failed attempt.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let request = payload.map(|Json(r)| r).unwrap_or_default();

    if !state.credentials.verify(&request.email, &request.password) {
        tracing::warn!("login rejected");
        return Err(AppError::InvalidCredentials);
    }

    session.cycle_id().await?;
    session.insert(SESSION_AUTH_KEY, true).await?;
    tracing::info!("operator logged in");

    Ok(Json(ApiResponse::message("Login successful")))
}

/// Log out by destroying the session.
///
/// Always answers 200. A session store failure is logged, not reported.
pub async fn logout(session: Session) -> Json<ApiResponse<()>> {
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to destroy session: {}", e);
    }

    Json(ApiResponse::message("Logged out successfully"))
}

/// Report the session flag. Never fails; errors read as unauthenticated.
pub async fn auth_status(session: Session) -> Json<AuthStatus> {
    let is_authenticated = is_authenticated(&session).await.unwrap_or_else(|e| {
        tracing::warn!("Failed to read session: {}", e);
        false
    });

    Json(AuthStatus { is_authenticated })
}
