use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::session::errors::CredentialStoreError;
use crate::session::models::Credential;
use crate::session::ports::CredentialStore;

/// Credential store adapter over the externally owned `users` table.
///
/// Reads only the fields the session domain needs and writes back the
/// last-authenticated timestamp. Pooling and retries are the pool's
/// concern.
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn credential_from_row(row: PgRow) -> Result<Credential, CredentialStoreError> {
        let id: Uuid = row
            .try_get("id")
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;
        let password_hash: String = row
            .try_get("password_hash")
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;
        let last_authenticated_at: Option<DateTime<Utc>> = row
            .try_get("last_authenticated_at")
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        Ok(Credential {
            subject_id: id.to_string(),
            password_hash,
            last_authenticated_at,
        })
    }
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, password_hash, last_authenticated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        row.map(Self::credential_from_row).transpose()
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<Credential>, CredentialStoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, password_hash, last_authenticated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        row.map(Self::credential_from_row).transpose()
    }

    async fn record_authentication(
        &self,
        subject_id: &str,
        at: DateTime<Utc>,
    ) -> Result<(), CredentialStoreError> {
        let id = Uuid::parse_str(subject_id)
            .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        sqlx::query(
            r#"
            UPDATE users
            SET last_authenticated_at = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| CredentialStoreError::Unavailable(e.to_string()))?;

        Ok(())
    }
}
