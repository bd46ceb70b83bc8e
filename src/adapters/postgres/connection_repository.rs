//! PostgreSQL implementation of ConnectionRepository.
//!
//! Token columns hold ciphertext produced by the `SecretCipher`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, db_error, user_id_column};
use crate::domain::calendar::{CalendarConnection, EncryptedSecret};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::ConnectionRepository;

#[derive(Clone)]
pub struct PostgresConnectionRepository {
    pool: PgPool,
}

impl PostgresConnectionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConnectionRepository for PostgresConnectionRepository {
    async fn upsert(&self, connection: &CalendarConnection) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO calendar_connections (
                user_id, access_token, refresh_token, expires_at, scopes,
                connected_at, last_synced_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                access_token = EXCLUDED.access_token,
                refresh_token = EXCLUDED.refresh_token,
                expires_at = EXCLUDED.expires_at,
                scopes = EXCLUDED.scopes,
                connected_at = EXCLUDED.connected_at,
                last_synced_at = EXCLUDED.last_synced_at
            "#,
        )
        .bind(connection.user_id().as_str())
        .bind(connection.access_token().as_str())
        .bind(connection.refresh_token().map(|t| t.as_str().to_string()))
        .bind(connection.expires_at().as_datetime())
        .bind(connection.scopes().to_vec())
        .bind(connection.connected_at().as_datetime())
        .bind(connection.last_synced_at().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error("upsert calendar connection"))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<CalendarConnection>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, access_token, refresh_token, expires_at, scopes,
                   connected_at, last_synced_at
            FROM calendar_connections
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch calendar connection"))?;

        row.as_ref().map(row_to_connection).transpose()
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM calendar_connections WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete calendar connection"))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_connection(row: &PgRow) -> Result<CalendarConnection, DomainError> {
    let access_token: String = column(row, "access_token")?;
    let refresh_token: Option<String> = column(row, "refresh_token")?;
    let expires_at: chrono::DateTime<chrono::Utc> = column(row, "expires_at")?;
    let connected_at: chrono::DateTime<chrono::Utc> = column(row, "connected_at")?;
    let last_synced_at: Option<chrono::DateTime<chrono::Utc>> = column(row, "last_synced_at")?;

    Ok(CalendarConnection::reconstitute(
        user_id_column(row)?,
        EncryptedSecret::new(access_token),
        refresh_token.map(EncryptedSecret::new),
        Timestamp::from_datetime(expires_at),
        column(row, "scopes")?,
        Timestamp::from_datetime(connected_at),
        last_synced_at.map(Timestamp::from_datetime),
    ))
}
