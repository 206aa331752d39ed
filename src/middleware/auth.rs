//! Session guard middleware.
//!
//! This middleware intercepts every protected request to:
//! 1. Load the cookie-bound session
//! 2. Check the `isAuthenticated` flag set by a successful login
//! 3. Reject requests without the flag with HTTP 401
//!
//! It has no other side effects; authenticated requests pass through unchanged.

use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::error::AppError;

/// Session key holding the authentication flag.
pub const SESSION_AUTH_KEY: &str = "isAuthenticated";

/// Read the authentication flag, treating an unset flag as false.
pub async fn is_authenticated(session: &Session) -> Result<bool, AppError> {
    Ok(session
        .get::<bool>(SESSION_AUTH_KEY)
        .await?
        .unwrap_or(false))
}

/// Session guard middleware function.
///
/// # Flow
///
/// 1. Extract the `Session` (requires the session layer to wrap this router)
/// 2. If the flag is true: call the next handler
/// 3. Otherwise: return 401 `{"success": false, "error": "Not authenticated"}`
pub async fn require_session(
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !is_authenticated(&session).await? {
        tracing::debug!(path = %request.uri().path(), "rejected unauthenticated request");
        return Err(AppError::Unauthenticated);
    }

    Ok(next.run(request).await)
}
