//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::NaiveTime;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, corrupt, db_error, non_negative, user_id_column};
use crate::domain::foundation::{DomainError, ErrorCode, Timestamp, UserId, UtcOffset};
use crate::domain::profile::{CoachingTone, UserProfile, WorkHours};
use crate::ports::ProfileRepository;

#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_PROFILE: &str = r#"
    SELECT user_id, display_name, utc_offset_minutes, work_start, work_end,
           focus_block_minutes, break_minutes, coaching_tone,
           weekly_focus_goal_minutes, nudges_enabled, created_at, updated_at
    FROM user_profiles
"#;

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn create(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let hours = profile.work_hours();
        sqlx::query(
            r#"
            INSERT INTO user_profiles (
                user_id, display_name, utc_offset_minutes, work_start, work_end,
                focus_block_minutes, break_minutes, coaching_tone,
                weekly_focus_goal_minutes, nudges_enabled, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(profile.display_name())
        .bind(profile.utc_offset().minutes())
        .bind(hours.start())
        .bind(hours.end())
        .bind(profile.focus_block_minutes() as i32)
        .bind(profile.break_minutes() as i32)
        .bind(profile.coaching_tone().as_str())
        .bind(profile.weekly_focus_goal_minutes() as i32)
        .bind(profile.nudges_enabled())
        .bind(profile.created_at().as_datetime())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => DomainError::new(
                ErrorCode::ProfileAlreadyExists,
                "Profile already exists",
            ),
            _ => DomainError::database("insert profile", e),
        })?;

        Ok(())
    }

    async fn update(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let hours = profile.work_hours();
        let result = sqlx::query(
            r#"
            UPDATE user_profiles SET
                display_name = $2,
                utc_offset_minutes = $3,
                work_start = $4,
                work_end = $5,
                focus_block_minutes = $6,
                break_minutes = $7,
                coaching_tone = $8,
                weekly_focus_goal_minutes = $9,
                nudges_enabled = $10,
                updated_at = $11
            WHERE user_id = $1
            "#,
        )
        .bind(profile.user_id().as_str())
        .bind(profile.display_name())
        .bind(profile.utc_offset().minutes())
        .bind(hours.start())
        .bind(hours.end())
        .bind(profile.focus_block_minutes() as i32)
        .bind(profile.break_minutes() as i32)
        .bind(profile.coaching_tone().as_str())
        .bind(profile.weekly_focus_goal_minutes() as i32)
        .bind(profile.nudges_enabled())
        .bind(profile.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update profile"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("Profile not found for user {}", profile.user_id()),
            ));
        }

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<UserProfile>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE user_id = $1", SELECT_PROFILE))
            .bind(user_id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch profile"))?;

        row.as_ref().map(row_to_profile).transpose()
    }

    async fn exists_for_user(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM user_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check profile existence"))?;

        Ok(result.0 > 0)
    }

    async fn delete(&self, user_id: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete profile"))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_profile(row: &PgRow) -> Result<UserProfile, DomainError> {
    let offset: i32 = column(row, "utc_offset_minutes")?;
    let work_start: NaiveTime = column(row, "work_start")?;
    let work_end: NaiveTime = column(row, "work_end")?;
    let tone: String = column(row, "coaching_tone")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(UserProfile::reconstitute(
        user_id_column(row)?,
        column(row, "display_name")?,
        UtcOffset::from_minutes(offset).map_err(|e| corrupt("utc_offset_minutes", e))?,
        WorkHours::new(work_start, work_end).map_err(|e| corrupt("work hours", e))?,
        non_negative("focus_block_minutes", column(row, "focus_block_minutes")?)?,
        non_negative("break_minutes", column(row, "break_minutes")?)?,
        tone.parse::<CoachingTone>()
            .map_err(|e| corrupt("coaching_tone", e))?,
        non_negative("weekly_focus_goal_minutes", column(row, "weekly_focus_goal_minutes")?)?,
        column(row, "nudges_enabled")?,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
