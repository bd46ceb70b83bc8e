//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresProfileRepository` - user profiles
//! - `PostgresPlanRepository` - daily plans, blocks stored as JSONB
//! - `PostgresSignalRepository` - check-ins, drift reports and nudges
//! - `PostgresRewardRepository` - unlocked badges and weekly scores
//! - `PostgresConnectionRepository` - encrypted calendar connections
//!
//! Queries are checked at runtime; the schema lives in `migrations/`.

mod connection_repository;
mod plan_repository;
mod profile_repository;
mod reward_repository;
mod signal_repository;

pub use connection_repository::PostgresConnectionRepository;
pub use plan_repository::PostgresPlanRepository;
pub use profile_repository::PostgresProfileRepository;
pub use reward_repository::PostgresRewardRepository;
pub use signal_repository::PostgresSignalRepository;

use sqlx::postgres::PgRow;
use sqlx::{Decode, Postgres, Row, Type};

use crate::domain::foundation::{DomainError, ErrorCode, UserId};

/// Maps a driver error to `DATABASE_ERROR` naming the failed operation.
fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> DomainError {
    move |e| DomainError::database(operation, e)
}

/// Reads a column, mapping decode failures to `DATABASE_ERROR`.
fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}

/// A stored value that no longer satisfies domain rules.
fn corrupt(field: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid stored {}: {}", field, detail),
    )
}

fn user_id_column(row: &PgRow) -> Result<UserId, DomainError> {
    let raw: String = column(row, "user_id")?;
    UserId::new(raw).map_err(|e| corrupt("user_id", e))
}

fn non_negative(field: &str, value: i32) -> Result<u32, DomainError> {
    u32::try_from(value).map_err(|_| corrupt(field, value))
}
