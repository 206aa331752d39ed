//! API key records and their request/response types.
//!
//! API keys are the secrets the operator keeps in the vault. They are stored only as
//! AES-256-GCM ciphertext; see [`crate::crypto`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an API key record from the store.
///
/// # Database Table
///
/// Maps to the `api_keys` table with columns:
/// - `id`: Unique identifier (UUID), assigned by the store
/// - `name`: Display label, never empty
/// - `description`: Free text, empty when not given
/// - `encrypted_key`: Hex-encoded ciphertext of the secret
/// - `created_at`: When the key was stored
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKeyRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Ciphertext only. The plaintext secret is never persisted.
    pub encrypted_key: String,

    pub created_at: DateTime<Utc>,
}

/// Values handed to the store to create a record.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    pub name: String,
    pub description: String,
    pub encrypted_key: String,
}

/// Request body for storing a new API key.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "OpenAI",
///   "description": "personal account",
///   "apiKey": "sk-test-123"
/// }
/// ```
///
/// Missing fields deserialize as empty so the handler can answer with a
/// validation error instead of a body rejection.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, rename = "apiKey")]
    pub api_key: String,
}

/// API key as returned to clients, with the secret decrypted.
///
/// # JSON Example
///
/// ```json
/// {
///   "_id": "550e8400-e29b-41d4-a716-446655440000",
///   "name": "OpenAI",
///   "description": "",
///   "apiKey": "sk-test-123",
///   "createdAt": "2025-12-20T10:00:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiKeyResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,

    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(rename = "apiKey")]
    pub api_key: String,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ApiKeyResponse {
    /// Pair a stored record with its decrypted secret.
    pub fn from_record(record: ApiKeyRecord, api_key: String) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            api_key,
            created_at: record.created_at,
        }
    }
}
