//! PostgreSQL implementation of SignalRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::{column, corrupt, db_error, user_id_column};
use crate::domain::foundation::{
    BlockId, CheckInId, DomainError, DriftReportId, ErrorCode, NudgeId, Rating, TimeSpan,
    Timestamp, UserId,
};
use crate::domain::signals::{CheckIn, DriftReport, DriftTrigger, Nudge, NudgeLevel, NudgeSource};
use crate::ports::SignalRepository;

#[derive(Clone)]
pub struct PostgresSignalRepository {
    pool: PgPool,
}

impl PostgresSignalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SignalRepository for PostgresSignalRepository {
    async fn save_check_in(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO check_ins (id, user_id, recorded_at, mood, energy, focus, note)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(check_in.id.as_uuid())
        .bind(check_in.user_id.as_str())
        .bind(check_in.recorded_at.as_datetime())
        .bind(check_in.mood.value() as i16)
        .bind(check_in.energy.value() as i16)
        .bind(check_in.focus.value() as i16)
        .bind(check_in.note.as_deref())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert check-in"))?;

        Ok(())
    }

    async fn save_drift_report(&self, report: &DriftReport) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO drift_reports (
                id, user_id, started_at, minutes, trigger, block_id, note, reported_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.user_id.as_str())
        .bind(report.started_at.as_datetime())
        .bind(report.minutes as i32)
        .bind(report.trigger.as_str())
        .bind(report.block_id.as_ref().map(|id| *id.as_uuid()))
        .bind(report.note.as_deref())
        .bind(report.reported_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert drift report"))?;

        Ok(())
    }

    async fn save_nudge(&self, nudge: &Nudge) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO nudges (
                id, user_id, drift_report_id, level, message, source, created_at, acknowledged_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(nudge.id.as_uuid())
        .bind(nudge.user_id.as_str())
        .bind(nudge.drift_report_id.as_uuid())
        .bind(nudge.level.as_str())
        .bind(&nudge.message)
        .bind(nudge.source.as_str())
        .bind(nudge.created_at.as_datetime())
        .bind(nudge.acknowledged_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(db_error("insert nudge"))?;

        Ok(())
    }

    async fn update_nudge(&self, nudge: &Nudge) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE nudges SET acknowledged_at = $2 WHERE id = $1")
            .bind(nudge.id.as_uuid())
            .bind(nudge.acknowledged_at.map(|t| *t.as_datetime()))
            .execute(&self.pool)
            .await
            .map_err(db_error("update nudge"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NudgeNotFound,
                format!("Nudge not found: {}", nudge.id),
            ));
        }

        Ok(())
    }

    async fn find_nudge(&self, user_id: &UserId, id: &NudgeId) -> Result<Option<Nudge>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, drift_report_id, level, message, source, created_at, acknowledged_at
            FROM nudges
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch nudge"))?;

        row.as_ref().map(row_to_nudge).transpose()
    }

    async fn check_ins_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<CheckIn>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, recorded_at, mood, energy, focus, note
            FROM check_ins
            WHERE user_id = $1 AND recorded_at >= $2 AND recorded_at < $3
            ORDER BY recorded_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(span.start())
        .bind(span.end())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch check-ins"))?;

        rows.iter().map(row_to_check_in).collect()
    }

    async fn drift_reports_in(
        &self,
        user_id: &UserId,
        span: TimeSpan,
    ) -> Result<Vec<DriftReport>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, started_at, minutes, trigger, block_id, note, reported_at
            FROM drift_reports
            WHERE user_id = $1 AND started_at >= $2 AND started_at < $3
            ORDER BY started_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(span.start())
        .bind(span.end())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch drift reports"))?;

        rows.iter().map(row_to_drift_report).collect()
    }

    async fn nudges_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<Nudge>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, drift_report_id, level, message, source, created_at, acknowledged_at
            FROM nudges
            WHERE user_id = $1 AND created_at >= $2 AND created_at < $3
            ORDER BY created_at
            "#,
        )
        .bind(user_id.as_str())
        .bind(span.start())
        .bind(span.end())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("fetch nudges"))?;

        rows.iter().map(row_to_nudge).collect()
    }
}

type DbTime = chrono::DateTime<chrono::Utc>;

fn rating(row: &PgRow, name: &str) -> Result<Rating, DomainError> {
    let raw: i16 = column(row, name)?;
    u8::try_from(raw)
        .ok()
        .and_then(|v| Rating::new(v).ok())
        .ok_or_else(|| corrupt(name, raw))
}

fn row_to_check_in(row: &PgRow) -> Result<CheckIn, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let recorded_at: DbTime = column(row, "recorded_at")?;

    Ok(CheckIn {
        id: CheckInId::from_uuid(id),
        user_id: user_id_column(row)?,
        recorded_at: Timestamp::from_datetime(recorded_at),
        mood: rating(row, "mood")?,
        energy: rating(row, "energy")?,
        focus: rating(row, "focus")?,
        note: column(row, "note")?,
    })
}

fn row_to_drift_report(row: &PgRow) -> Result<DriftReport, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let started_at: DbTime = column(row, "started_at")?;
    let reported_at: DbTime = column(row, "reported_at")?;
    let minutes: i32 = column(row, "minutes")?;
    let trigger: String = column(row, "trigger")?;
    let block_id: Option<uuid::Uuid> = column(row, "block_id")?;

    Ok(DriftReport {
        id: DriftReportId::from_uuid(id),
        user_id: user_id_column(row)?,
        started_at: Timestamp::from_datetime(started_at),
        minutes: u32::try_from(minutes).map_err(|_| corrupt("minutes", minutes))?,
        trigger: trigger
            .parse::<DriftTrigger>()
            .map_err(|e| corrupt("trigger", e))?,
        block_id: block_id.map(BlockId::from_uuid),
        note: column(row, "note")?,
        reported_at: Timestamp::from_datetime(reported_at),
    })
}

fn row_to_nudge(row: &PgRow) -> Result<Nudge, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let drift_report_id: uuid::Uuid = column(row, "drift_report_id")?;
    let level: String = column(row, "level")?;
    let source: String = column(row, "source")?;
    let created_at: DbTime = column(row, "created_at")?;
    let acknowledged_at: Option<DbTime> = column(row, "acknowledged_at")?;

    Ok(Nudge {
        id: NudgeId::from_uuid(id),
        user_id: user_id_column(row)?,
        drift_report_id: DriftReportId::from_uuid(drift_report_id),
        level: NudgeLevel::parse(&level).ok_or_else(|| corrupt("nudge level", &level))?,
        message: column(row, "message")?,
        source: NudgeSource::parse(&source).ok_or_else(|| corrupt("nudge source", &source))?,
        created_at: Timestamp::from_datetime(created_at),
        acknowledged_at: acknowledged_at.map(Timestamp::from_datetime),
    })
}
