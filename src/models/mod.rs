//! Data models representing stored records and API payloads.
//!
//! This module contains the record types the store persists, plus the JSON shapes
//! exchanged with clients.

use serde::{Deserialize, Serialize};

/// Stored API keys
pub mod api_key;
/// Login payloads and session status
pub mod auth;
/// Hackathon metadata
pub mod hackathon;

/// Success envelope shared by every mutating endpoint.
///
/// # JSON Example
///
/// ```json
/// {
///   "success": true,
///   "message": "API key added successfully",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    /// Success with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Success with a message and a payload.
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}
