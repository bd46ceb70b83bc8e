//! PostgreSQL implementation of RewardRepository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, corrupt, db_error, user_id_column};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::rewards::{Badge, ScoreTier, UnlockedBadge, WeeklyScoreRecord, WeeklyStats};
use crate::ports::RewardRepository;

#[derive(Clone)]
pub struct PostgresRewardRepository {
    pool: PgPool,
}

impl PostgresRewardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RewardRepository for PostgresRewardRepository {
    async fn unlocked_badges(&self, user_id: &UserId) -> Result<Vec<UnlockedBadge>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT badge, unlocked_at, week_start
            FROM unlocked_badges
            WHERE user_id = $1
            ORDER BY unlocked_at, badge
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch badges"))?;

        rows.iter().map(row_to_badge).collect()
    }

    async fn unlock_badges(
        &self,
        user_id: &UserId,
        badges: &[UnlockedBadge],
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(db_error("begin transaction"))?;

        for unlock in badges {
            sqlx::query(
                r#"
                INSERT INTO unlocked_badges (user_id, badge, unlocked_at, week_start)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, badge) DO NOTHING
                "#,
            )
            .bind(user_id.as_str())
            .bind(unlock.badge.as_str())
            .bind(unlock.unlocked_at.as_datetime())
            .bind(unlock.week_start)
            .execute(&mut *tx)
            .await
            .map_err(db_error("insert badge"))?;
        }

        tx.commit().await.map_err(db_error("commit badges"))?;
        Ok(())
    }

    async fn save_weekly_score(&self, record: &WeeklyScoreRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO weekly_scores (user_id, week_start, score, tier, stats, computed_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id, week_start) DO UPDATE SET
                score = EXCLUDED.score,
                tier = EXCLUDED.tier,
                stats = EXCLUDED.stats,
                computed_at = EXCLUDED.computed_at
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.week_start)
        .bind(record.score as i16)
        .bind(record.tier.as_str())
        .bind(Json(&record.stats))
        .bind(record.computed_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("save weekly score"))?;

        Ok(())
    }

    async fn find_weekly_score(
        &self,
        user_id: &UserId,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyScoreRecord>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, week_start, score, tier, stats, computed_at
            FROM weekly_scores
            WHERE user_id = $1 AND week_start = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(week_start)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch weekly score"))?;

        row.as_ref().map(row_to_score).transpose()
    }
}

fn row_to_badge(row: &PgRow) -> Result<UnlockedBadge, DomainError> {
    let badge: String = column(row, "badge")?;
    let unlocked_at: chrono::DateTime<chrono::Utc> = column(row, "unlocked_at")?;

    Ok(UnlockedBadge {
        badge: Badge::parse(&badge).ok_or_else(|| corrupt("badge", &badge))?,
        unlocked_at: Timestamp::from_datetime(unlocked_at),
        week_start: column(row, "week_start")?,
    })
}

fn row_to_score(row: &PgRow) -> Result<WeeklyScoreRecord, DomainError> {
    let score: i16 = column(row, "score")?;
    let tier: String = column(row, "tier")?;
    let Json(stats): Json<WeeklyStats> = column(row, "stats")?;
    let computed_at: chrono::DateTime<chrono::Utc> = column(row, "computed_at")?;

    Ok(WeeklyScoreRecord {
        user_id: user_id_column(row)?,
        week_start: column(row, "week_start")?,
        score: u8::try_from(score).map_err(|_| corrupt("score", score))?,
        tier: ScoreTier::parse(&tier).ok_or_else(|| corrupt("tier", &tier))?,
        stats,
        computed_at: Timestamp::from_datetime(computed_at),
    })
}
