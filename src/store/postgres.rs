use async_trait::async_trait;
use uuid::Uuid;

use super::{StoreError, VaultStore};
use crate::db::DbPool;
use crate::models::{
    api_key::{ApiKeyRecord, NewApiKey},
    hackathon::{HackathonFields, HackathonRecord},
};

const HACKATHON_COLUMNS: &str = "id, hackathon_name, organizer, registration_deadline, event_date, \
     location, registration_fee, prize_pool, description, eligibility, team_size, link, \
     created_at, updated_at";

/// PostgreSQL-backed store.
///
/// Ids come from `gen_random_uuid()` and timestamps from `NOW()`, so the database
/// is the single source of both.
#[derive(Clone, Debug)]
pub struct PgVaultStore {
    pool: DbPool,
}

impl PgVaultStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VaultStore for PgVaultStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, StoreError> {
        let keys = sqlx::query_as::<_, ApiKeyRecord>(
            "SELECT id, name, description, encrypted_key, created_at
             FROM api_keys
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(keys)
    }

    async fn insert_api_key(&self, new_key: NewApiKey) -> Result<ApiKeyRecord, StoreError> {
        let record = sqlx::query_as::<_, ApiKeyRecord>(
            r#"
            INSERT INTO api_keys (name, description, encrypted_key)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, encrypted_key, created_at
            "#,
        )
        .bind(new_key.name)
        .bind(new_key.description)
        .bind(new_key.encrypted_key)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete_api_key(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM api_keys WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_hackathons(&self) -> Result<Vec<HackathonRecord>, StoreError> {
        let hackathons = sqlx::query_as::<_, HackathonRecord>(&format!(
            "SELECT {HACKATHON_COLUMNS} FROM hackathons ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(hackathons)
    }

    async fn insert_hackathon(
        &self,
        fields: HackathonFields,
    ) -> Result<HackathonRecord, StoreError> {
        let sql = format!(
            r#"
            INSERT INTO hackathons (
                hackathon_name, organizer, registration_deadline, event_date, location,
                registration_fee, prize_pool, description, eligibility, team_size, link
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {HACKATHON_COLUMNS}
            "#
        );

        let record = bind_fields(sqlx::query_as::<_, HackathonRecord>(&sql), fields)
            .fetch_one(&self.pool)
            .await?;

        Ok(record)
    }

    async fn update_hackathon(
        &self,
        id: Uuid,
        fields: HackathonFields,
    ) -> Result<Option<HackathonRecord>, StoreError> {
        let sql = format!(
            r#"
            UPDATE hackathons
            SET hackathon_name = $1, organizer = $2, registration_deadline = $3,
                event_date = $4, location = $5, registration_fee = $6, prize_pool = $7,
                description = $8, eligibility = $9, team_size = $10, link = $11,
                updated_at = NOW()
            WHERE id = $12
            RETURNING {HACKATHON_COLUMNS}
            "#
        );

        let record = bind_fields(sqlx::query_as::<_, HackathonRecord>(&sql), fields)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn delete_hackathon(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM hackathons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Bind the eleven text fields as `$1..$11`, in column order.
fn bind_fields<'q>(
    query: sqlx::query::QueryAs<'q, sqlx::Postgres, HackathonRecord, sqlx::postgres::PgArguments>,
    fields: HackathonFields,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, HackathonRecord, sqlx::postgres::PgArguments> {
    query
        .bind(fields.hackathon_name)
        .bind(fields.organizer)
        .bind(fields.registration_deadline)
        .bind(fields.event_date)
        .bind(fields.location)
        .bind(fields.registration_fee)
        .bind(fields.prize_pool)
        .bind(fields.description)
        .bind(fields.eligibility)
        .bind(fields.team_size)
        .bind(fields.link)
}
