//! API key service - encryption at rest around the record store.
//!
//! This service handles:
//! - Validating new keys
//! - Encrypting the secret before it is stored
//! - Decrypting every secret when the list is read
//!
//! The plaintext secret only exists in request and response memory.

use uuid::Uuid;

use crate::{
    crypto::KeyCipher,
    error::AppError,
    models::api_key::{ApiKeyResponse, CreateApiKeyRequest, NewApiKey},
    store::VaultStore,
};

/// List every stored key, newest first, with secrets decrypted.
///
/// # Errors
///
/// - `Store`: the store could not be read
/// - `Crypto`: a stored value failed to decrypt (wrong key or corrupted data).
///   The whole list fails rather than returning a bogus secret.
pub async fn list_api_keys(
    store: &dyn VaultStore,
    cipher: &KeyCipher,
) -> Result<Vec<ApiKeyResponse>, AppError> {
    let records = store.list_api_keys().await?;

    records
        .into_iter()
        .map(|record| -> Result<ApiKeyResponse, AppError> {
            let api_key = cipher.decrypt(&record.encrypted_key).map_err(|e| {
                tracing::error!(key_id = %record.id, "failed to decrypt stored API key");
                e
            })?;
            Ok(ApiKeyResponse::from_record(record, api_key))
        })
        .collect()
}

/// Validate, encrypt and store a new key.
///
/// # Process
///
/// 1. Reject blank name or secret
/// 2. Encrypt the secret
/// 3. Insert the record (the store assigns id and timestamp)
/// 4. Echo the plaintext back for immediate display
///
/// # Errors
///
/// - `InvalidRequest`: name or API key missing
/// - `Crypto`: encryption failed
/// - `Store`: insert failed
pub async fn create_api_key(
    store: &dyn VaultStore,
    cipher: &KeyCipher,
    request: CreateApiKeyRequest,
) -> Result<ApiKeyResponse, AppError> {
    let name = request.name.trim().to_string();
    // The secret is stored exactly as given; only the blank check trims.
    let api_key = request.api_key;

    if name.is_empty() || api_key.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "Name and API key are required".to_string(),
        ));
    }

    let encrypted_key = cipher.encrypt(&api_key)?;
    let record = store
        .insert_api_key(NewApiKey {
            name,
            description: request.description.unwrap_or_default().trim().to_string(),
            encrypted_key,
        })
        .await?;

    tracing::info!(key_id = %record.id, "API key stored");

    Ok(ApiKeyResponse::from_record(record, api_key))
}

/// Delete a key by id. Deleting a missing id is not an error.
pub async fn delete_api_key(store: &dyn VaultStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_api_key(id).await? {
        tracing::info!(key_id = %id, "API key deleted");
    } else {
        tracing::debug!(key_id = %id, "delete of unknown API key ignored");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryVaultStore;

    fn cipher() -> KeyCipher {
        KeyCipher::from_config_value("unit test key").unwrap()
    }

    fn request(name: &str, api_key: &str) -> CreateApiKeyRequest {
        CreateApiKeyRequest {
            name: name.to_string(),
            description: None,
            api_key: api_key.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_decrypts() {
        let store = MemoryVaultStore::new();
        let cipher = cipher();

        let created = create_api_key(&store, &cipher, request("OpenAI", "sk-test-123"))
            .await
            .unwrap();
        assert_eq!(created.api_key, "sk-test-123");
        assert_eq!(created.description, "");

        let listed = list_api_keys(&store, &cipher).await.unwrap();
        assert_eq!(listed, vec![created]);
    }

    #[tokio::test]
    async fn test_only_ciphertext_is_stored() {
        let store = MemoryVaultStore::new();

        create_api_key(&store, &cipher(), request("OpenAI", "sk-test-123"))
            .await
            .unwrap();

        let stored = store.list_api_keys().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert!(!stored[0].encrypted_key.contains("sk-test-123"));
    }

    #[tokio::test]
    async fn test_blank_fields_rejected_and_nothing_stored() {
        let store = MemoryVaultStore::new();
        let cipher = cipher();

        for (name, key) in [("", "sk-1"), ("OpenAI", ""), ("   ", "sk-1"), ("OpenAI", "  ")] {
            let result = create_api_key(&store, &cipher, request(name, key)).await;
            assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        }

        assert!(store.list_api_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_fails_on_wrong_key() {
        let store = MemoryVaultStore::new();

        create_api_key(&store, &cipher(), request("OpenAI", "sk-test-123"))
            .await
            .unwrap();

        let other = KeyCipher::from_config_value("a different key").unwrap();
        let result = list_api_keys(&store, &other).await;
        assert!(matches!(result, Err(AppError::Crypto(_))));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_succeeds() {
        let store = MemoryVaultStore::new();

        assert!(delete_api_key(&store, Uuid::new_v4()).await.is_ok());
    }
}
