//! Hackathon service - validation in front of the record store.

use uuid::Uuid;

use crate::{
    error::AppError,
    models::hackathon::{HackathonFields, HackathonRecord},
    store::VaultStore,
};

fn validated(fields: HackathonFields) -> Result<HackathonFields, AppError> {
    let fields = fields.normalized();
    if fields.hackathon_name.is_empty() {
        return Err(AppError::InvalidRequest(
            "Hackathon name is required".to_string(),
        ));
    }
    Ok(fields)
}

pub async fn list_hackathons(store: &dyn VaultStore) -> Result<Vec<HackathonRecord>, AppError> {
    Ok(store.list_hackathons().await?)
}

/// Create a hackathon. Fields are trimmed; the name must be non-empty.
pub async fn create_hackathon(
    store: &dyn VaultStore,
    fields: HackathonFields,
) -> Result<HackathonRecord, AppError> {
    let record = store.insert_hackathon(validated(fields)?).await?;
    tracing::info!(hackathon_id = %record.id, "hackathon created");
    Ok(record)
}

/// Replace all fields of an existing hackathon.
///
/// # Errors
///
/// - `InvalidRequest`: empty name
/// - `HackathonNotFound`: no record with this id
pub async fn update_hackathon(
    store: &dyn VaultStore,
    id: Uuid,
    fields: HackathonFields,
) -> Result<HackathonRecord, AppError> {
    let record = store
        .update_hackathon(id, validated(fields)?)
        .await?
        .ok_or(AppError::HackathonNotFound)?;
    tracing::info!(hackathon_id = %record.id, "hackathon updated");
    Ok(record)
}

pub async fn delete_hackathon(store: &dyn VaultStore, id: Uuid) -> Result<(), AppError> {
    if store.delete_hackathon(id).await? {
        tracing::info!(hackathon_id = %id, "hackathon deleted");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryVaultStore;

    #[tokio::test]
    async fn test_create_with_only_name() {
        let store = MemoryVaultStore::new();

        create_hackathon(&store, HackathonFields::named("HackX"))
            .await
            .unwrap();

        let listed = list_hackathons(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fields, HackathonFields::named("HackX"));
        assert_eq!(listed[0].fields.prize_pool, "");
    }

    #[tokio::test]
    async fn test_update_reflects_only_new_fields() {
        let store = MemoryVaultStore::new();
        let created = create_hackathon(
            &store,
            HackathonFields {
                location: "Online".to_string(),
                ..HackathonFields::named("HackX")
            },
        )
        .await
        .unwrap();

        update_hackathon(
            &store,
            created.id,
            HackathonFields {
                prize_pool: "$5,000".to_string(),
                ..HackathonFields::named("HackX")
            },
        )
        .await
        .unwrap();

        let listed = list_hackathons(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, created.id);
        assert_eq!(listed[0].fields.prize_pool, "$5,000");
        assert_eq!(listed[0].fields.location, "");
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let store = MemoryVaultStore::new();
        let created = create_hackathon(&store, HackathonFields::named("HackX"))
            .await
            .unwrap();

        let create = create_hackathon(&store, HackathonFields::named("  ")).await;
        assert!(matches!(create, Err(AppError::InvalidRequest(_))));

        let update = update_hackathon(&store, created.id, HackathonFields::default()).await;
        assert!(matches!(update, Err(AppError::InvalidRequest(_))));

        let listed = list_hackathons(&store).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].fields.hackathon_name, "HackX");
    }

    #[tokio::test]
    async fn test_update_unknown_id_not_found() {
        let store = MemoryVaultStore::new();

        let result =
            update_hackathon(&store, Uuid::new_v4(), HackathonFields::named("HackX")).await;

        assert!(matches!(result, Err(AppError::HackathonNotFound)));
    }
}
