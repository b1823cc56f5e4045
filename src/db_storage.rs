use crate::lead_store::{LeadStore, StoreError};
use crate::models::{Lead, NewLead};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL-backed lead store.
///
/// Relies on the `leads_email_lower_key` unique index for duplicate
/// detection, so two concurrent inserts with the same email cannot both
/// commit.
#[derive(Clone)]
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps a sqlx failure, turning unique violations into `DuplicateKey`.
fn map_sqlx_error(err: sqlx::Error, email: Option<&str>) -> StoreError {
    match (&err, email) {
        (sqlx::Error::Database(db_err), Some(email)) if db_err.is_unique_violation() => {
            StoreError::DuplicateKey(email.to_string())
        }
        _ => {
            tracing::error!("Database error: {:?}", err);
            StoreError::Unavailable(err.to_string())
        }
    }
}

#[async_trait]
impl LeadStore for PgLeadStore {
    async fn insert(&self, lead: NewLead) -> Result<Lead, StoreError> {
        let id = Uuid::new_v4();

        let stored = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (id, name, email, phone, birth_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, birth_date
            "#,
        )
        .bind(id)
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(lead.birth_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, Some(&lead.email)))?;

        tracing::info!("Created lead with ID: {}", stored.id);
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Lead>, StoreError> {
        sqlx::query_as::<_, Lead>(
            "SELECT id, name, email, phone, birth_date FROM leads WHERE lower(email) = lower($1) LIMIT 1",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, None))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, StoreError> {
        sqlx::query_as::<_, Lead>(
            "SELECT id, name, email, phone, birth_date FROM leads WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, None))
    }

    async fn list_all(&self) -> Result<Vec<Lead>, StoreError> {
        let leads = sqlx::query_as::<_, Lead>(
            "SELECT id, name, email, phone, birth_date FROM leads ORDER BY created_at ASC, id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, None))?;

        tracing::info!("Retrieved {} leads from database", leads.len());
        Ok(leads)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| map_sqlx_error(e, None))
    }
}
