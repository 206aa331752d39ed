//! Persistence for API key and hackathon records.
//!
//! Handlers talk to the store through the [`VaultStore`] trait so the same routes
//! run against PostgreSQL in production and an in-memory map in development and
//! tests. The store owns the records: ids and timestamps are assigned here, and no
//! caller keeps a copy between requests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    api_key::{ApiKeyRecord, NewApiKey},
    hackathon::{HackathonFields, HackathonRecord},
};

mod memory;
mod postgres;

pub use memory::MemoryVaultStore;
pub use postgres::PgVaultStore;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure in the PostgreSQL backend.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Record persistence used by the HTTP handlers.
///
/// List operations return records newest first. Deletes report whether a record
/// was removed; callers decide whether that matters.
#[async_trait]
pub trait VaultStore: Send + Sync {
    /// Cheap round trip used by the health probe.
    async fn ping(&self) -> Result<(), StoreError>;

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, StoreError>;

    async fn insert_api_key(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, StoreError>;

    async fn delete_api_key(&self, id: Uuid) -> Result<bool, StoreError>;

    async fn list_hackathons(&self) -> Result<Vec<HackathonRecord>, StoreError>;

    async fn insert_hackathon(
        &self,
        fields: HackathonFields,
    ) -> Result<HackathonRecord, StoreError>;

    /// Replace every text field of an existing hackathon.
    ///
    /// Returns `None` when no record has this id.
    async fn update_hackathon(
        &self,
        id: Uuid,
        fields: HackathonFields,
    ) -> Result<Option<HackathonRecord>, StoreError>;

    async fn delete_hackathon(&self, id: Uuid) -> Result<bool, StoreError>;
}
