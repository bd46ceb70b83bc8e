//! PostgreSQL implementation of PlanRepository.
//!
//! One row per (user, date). Blocks and unscheduled tasks are stored as
//! JSONB since they are always loaded and replaced with their plan.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{column, corrupt, db_error, user_id_column};
use crate::domain::foundation::{DomainError, ErrorCode, PlanId, Timestamp, UserId};
use crate::domain::plan::{DailyPlan, PlanSource, ScheduleBlock, UnscheduledTask};
use crate::ports::PlanRepository;

#[derive(Clone)]
pub struct PostgresPlanRepository {
    pool: PgPool,
}

impl PostgresPlanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_PLAN: &str = r#"
    SELECT id, user_id, plan_date, source, summary, blocks, unscheduled_tasks,
           created_at, updated_at
    FROM daily_plans
"#;

#[async_trait]
impl PlanRepository for PostgresPlanRepository {
    async fn save(&self, plan: &DailyPlan) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO daily_plans (
                id, user_id, plan_date, source, summary, blocks, unscheduled_tasks,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (user_id, plan_date) DO UPDATE SET
                id = EXCLUDED.id,
                source = EXCLUDED.source,
                summary = EXCLUDED.summary,
                blocks = EXCLUDED.blocks,
                unscheduled_tasks = EXCLUDED.unscheduled_tasks,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(plan.id().as_uuid())
        .bind(plan.user_id().as_str())
        .bind(plan.date())
        .bind(plan.source().as_str())
        .bind(plan.summary())
        .bind(Json(plan.blocks()))
        .bind(Json(plan.unscheduled_tasks()))
        .bind(plan.created_at().as_datetime())
        .bind(plan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("save plan"))?;

        Ok(())
    }

    async fn update(&self, plan: &DailyPlan) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE daily_plans SET
                blocks = $2,
                updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(plan.id().as_uuid())
        .bind(Json(plan.blocks()))
        .bind(plan.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update plan"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::PlanNotFound,
                format!("Plan not found: {}", plan.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_date(
        &self,
        user_id: &UserId,
        date: NaiveDate,
    ) -> Result<Option<DailyPlan>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE user_id = $1 AND plan_date = $2", SELECT_PLAN))
            .bind(user_id.as_str())
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch plan"))?;

        row.as_ref().map(row_to_plan).transpose()
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyPlan>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE user_id = $1 AND plan_date BETWEEN $2 AND $3 ORDER BY plan_date",
            SELECT_PLAN
        ))
        .bind(user_id.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch plans in range"))?;

        rows.iter().map(row_to_plan).collect()
    }
}

fn row_to_plan(row: &PgRow) -> Result<DailyPlan, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let source: String = column(row, "source")?;
    let Json(blocks): Json<Vec<ScheduleBlock>> = column(row, "blocks")?;
    let Json(unscheduled): Json<Vec<UnscheduledTask>> = column(row, "unscheduled_tasks")?;
    let created_at: chrono::DateTime<chrono::Utc> = column(row, "created_at")?;
    let updated_at: chrono::DateTime<chrono::Utc> = column(row, "updated_at")?;

    Ok(DailyPlan::reconstitute(
        PlanId::from_uuid(id),
        user_id_column(row)?,
        column(row, "plan_date")?,
        blocks,
        PlanSource::parse(&source).ok_or_else(|| corrupt("plan source", &source))?,
        column(row, "summary")?,
        unscheduled,
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
