//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{crypto::CryptoError, store::StoreError};

/// Message for a request body that is not valid JSON of the expected shape.
pub const INVALID_BODY: &str = "Invalid request body";

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error message.
///
/// # Error Categories
///
/// - **Validation Errors**: Missing required fields or an unreadable body
/// - **Authentication Errors**: Bad credentials or no authenticated session
/// - **Resource Errors**: Requested hackathon not found
/// - **Internal Errors**: Store, session store, or cipher failures
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or parameters are invalid.
    ///
    /// Returns HTTP 400 Bad Request.
    /// The String is the message shown to the operator.
    #[error("{0}")]
    InvalidRequest(String),

    /// Login attempt with the wrong email or password.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Guarded route reached without an authenticated session.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Not authenticated")]
    Unauthenticated,

    /// Update targeted a hackathon that does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Hackathon not found")]
    HackathonNotFound,

    /// Record store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Session store operation failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Encryption or decryption of a stored key failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // Serde detail stays in the log; clients get a fixed message
        tracing::debug!(detail = %rejection.body_text(), "rejected request body");
        AppError::InvalidRequest(INVALID_BODY.to_string())
    }
}

/// Convert AppError into an HTTP response.
///
/// # Response Format
///
/// All errors return JSON in this format:
/// ```json
/// {
///   "success": false,
///   "error": "Human-readable error message",
///   "code": "error_type"
/// }
/// ```
///
/// # Status Code Mapping
///
/// - `InvalidRequest` → 400 Bad Request
/// - `InvalidCredentials`, `Unauthenticated` → 401 Unauthorized
/// - `HackathonNotFound` → 404 Not Found
/// - `Store`, `Session`, `Crypto` → 500 Internal Server Error (details are logged, not sent)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::InvalidRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", msg.clone())
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                self.to_string(),
            ),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "not_authenticated",
                self.to_string(),
            ),
            AppError::HackathonNotFound => (
                StatusCode::NOT_FOUND,
                "hackathon_not_found",
                self.to_string(),
            ),
            AppError::Store(_) | AppError::Session(_) | AppError::Crypto(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_keeps_message() {
        let response =
            AppError::InvalidRequest("Name and API key are required".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Name and API key are required");
        assert_eq!(body["code"], "invalid_request");
    }

    #[tokio::test]
    async fn test_body_rejection_hides_serde_detail() {
        use axum::{Json, body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(r#"{"hackathon_name": 42}"#))
            .unwrap();
        let rejection = Json::<crate::models::hackathon::HackathonFields>::from_request(request, &())
            .await
            .unwrap_err();

        let body = body_json(AppError::from(rejection).into_response()).await;
        assert_eq!(body["error"], INVALID_BODY);
        assert!(!body.to_string().contains("line"));
    }

    #[tokio::test]
    async fn test_internal_errors_hide_details() {
        let response = AppError::Crypto(CryptoError::Decrypt).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "An internal error occurred");
        assert!(!body.to_string().contains("decryption"));
    }

    #[tokio::test]
    async fn test_auth_errors_are_401() {
        assert_eq!(
            AppError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }
}
