use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{StoreError, VaultStore};
use crate::models::{
    api_key::{ApiKeyRecord, NewApiKey},
    hackathon::{HackathonFields, HackathonRecord},
};

/// In-memory store for development and tests.
///
/// Records live in insertion order; listing walks them newest first. Contents are
/// lost when the process exits.
#[derive(Clone, Debug, Default)]
pub struct MemoryVaultStore {
    inner: Arc<Mutex<Records>>,
}

#[derive(Debug, Default)]
struct Records {
    api_keys: Vec<ApiKeyRecord>,
    hackathons: Vec<HackathonRecord>,
}

impl MemoryVaultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn records(&self) -> MutexGuard<'_, Records> {
        // A poisoned lock only means another request panicked mid-write; the
        // vectors themselves are still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Newest first. Equal timestamps keep reverse insertion order.
fn newest_first<T: Clone>(records: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut listed: Vec<T> = records.iter().rev().cloned().collect();
    listed.sort_by_key(|record| std::cmp::Reverse(created_at(record)));
    listed
}

#[async_trait]
impl VaultStore for MemoryVaultStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        Ok(newest_first(&self.records().api_keys, |k| k.created_at))
    }

    async fn insert_api_key(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, StoreError> {
        let record = ApiKeyRecord {
            id: Uuid::new_v4(),
            name: new_key.name,
            description: new_key.description,
            encrypted_key: new_key.encrypted_key,
            created_at: Utc::now(),
        };
        self.records().api_keys.push(record.clone());
        Ok(record)
    }

    async fn delete_api_key(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records();
        let before = records.api_keys.len();
        records.api_keys.retain(|k| k.id != id);
        Ok(records.api_keys.len() != before)
    }

    async fn list_hackathons(&self) -> Result<Vec<HackathonRecord>, StoreError> {
        Ok(newest_first(&self.records().hackathons, |h| h.created_at))
    }

    async fn insert_hackathon(
        &self,
        fields: HackathonFields,
    ) -> Result<HackathonRecord, StoreError> {
        let now = Utc::now();
        let record = HackathonRecord {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        };
        self.records().hackathons.push(record.clone());
        Ok(record)
    }

    async fn update_hackathon(
        &self,
        id: Uuid,
        fields: HackathonFields,
    ) -> Result<Option<HackathonRecord>, StoreError> {
        let mut records = self.records();
        let Some(record) = records.hackathons.iter_mut().find(|h| h.id == id) else {
            return Ok(None);
        };
        record.fields = fields;
        record.updated_at = Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete_hackathon(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records();
        let before = records.hackathons.len();
        records.hackathons.retain(|h| h.id != id);
        Ok(records.hackathons.len() != before)
    }
}
