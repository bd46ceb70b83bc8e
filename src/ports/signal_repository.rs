//! SignalRepository port for check-ins, drift reports and nudges.
//!
//! Time-range queries use half-open spans `[start, end)` over the record's
//! own instant: `recorded_at` for check-ins, `started_at` for drift reports
//! and `created_at` for nudges.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, NudgeId, TimeSpan, UserId};
use crate::domain::signals::{CheckIn, DriftReport, Nudge};

#[async_trait]
pub trait SignalRepository: Send + Sync {
    async fn save_check_in(&self, check_in: &CheckIn) -> Result<(), DomainError>;

    async fn save_drift_report(&self, report: &DriftReport) -> Result<(), DomainError>;

    async fn save_nudge(&self, nudge: &Nudge) -> Result<(), DomainError>;

    /// Persist the acknowledgement of a stored nudge.
    ///
    /// # Errors
    ///
    /// - `NudgeNotFound` if the nudge does not exist
    async fn update_nudge(&self, nudge: &Nudge) -> Result<(), DomainError>;

    /// Finds a nudge owned by `user_id`; other users' nudges are invisible.
    async fn find_nudge(&self, user_id: &UserId, id: &NudgeId) -> Result<Option<Nudge>, DomainError>;

    async fn check_ins_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<CheckIn>, DomainError>;

    async fn drift_reports_in(
        &self,
        user_id: &UserId,
        span: TimeSpan,
    ) -> Result<Vec<DriftReport>, DomainError>;

    async fn nudges_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<Nudge>, DomainError>;
}
