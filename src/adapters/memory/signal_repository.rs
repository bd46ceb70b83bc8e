//! In-memory `SignalRepository`.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, NudgeId, TimeSpan, UserId};
use crate::domain::signals::{CheckIn, DriftReport, Nudge};
use crate::ports::SignalRepository;

#[derive(Debug, Default)]
struct Signals {
    check_ins: Vec<CheckIn>,
    drift_reports: Vec<DriftReport>,
    nudges: Vec<Nudge>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySignalRepository {
    signals: Arc<RwLock<Signals>>,
}

impl InMemorySignalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn nudge_count(&self) -> usize {
        self.signals.read().await.nudges.len()
    }
}

/// Records of `user_id` whose instant falls in `span`, oldest first.
fn select<T: Clone>(
    items: &[T],
    user_id: &UserId,
    span: &TimeSpan,
    owner: impl Fn(&T) -> &UserId,
    at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>,
) -> Vec<T> {
    let mut selected: Vec<T> = items
        .iter()
        .filter(|item| owner(item) == user_id && span.contains(&at(item)))
        .cloned()
        .collect();
    selected.sort_by_key(|item| at(item));
    selected
}

#[async_trait]
impl SignalRepository for InMemorySignalRepository {
    async fn save_check_in(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        self.signals.write().await.check_ins.push(check_in.clone());
        Ok(())
    }

    async fn save_drift_report(&self, report: &DriftReport) -> Result<(), DomainError> {
        self.signals.write().await.drift_reports.push(report.clone());
        Ok(())
    }

    async fn save_nudge(&self, nudge: &Nudge) -> Result<(), DomainError> {
        self.signals.write().await.nudges.push(nudge.clone());
        Ok(())
    }

    async fn update_nudge(&self, nudge: &Nudge) -> Result<(), DomainError> {
        let mut signals = self.signals.write().await;
        match signals.nudges.iter_mut().find(|n| n.id == nudge.id) {
            Some(stored) => {
                *stored = nudge.clone();
                Ok(())
            }
            None => Err(DomainError::new(ErrorCode::NudgeNotFound, "Nudge not found")),
        }
    }

    async fn find_nudge(&self, user_id: &UserId, id: &NudgeId) -> Result<Option<Nudge>, DomainError> {
        Ok(self
            .signals
            .read()
            .await
            .nudges
            .iter()
            .find(|n| &n.id == id && &n.user_id == user_id)
            .cloned())
    }

    async fn check_ins_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<CheckIn>, DomainError> {
        let signals = self.signals.read().await;
        Ok(select(&signals.check_ins, user_id, &span, |c| &c.user_id, |c| *c.recorded_at.as_datetime()))
    }

    async fn drift_reports_in(
        &self,
        user_id: &UserId,
        span: TimeSpan,
    ) -> Result<Vec<DriftReport>, DomainError> {
        let signals = self.signals.read().await;
        Ok(select(&signals.drift_reports, user_id, &span, |d| &d.user_id, |d| *d.started_at.as_datetime()))
    }

    async fn nudges_in(&self, user_id: &UserId, span: TimeSpan) -> Result<Vec<Nudge>, DomainError> {
        let signals = self.signals.read().await;
        Ok(select(&signals.nudges, user_id, &span, |n| &n.user_id, |n| *n.created_at.as_datetime()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DriftReportId, Rating, Timestamp};
    use crate::domain::signals::{NudgeLevel, NudgeSource};
    use chrono::{TimeZone, Utc};

    fn at(h: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 5, 6, h, 0, 0).unwrap())
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn check_in(id: &str, h: u32) -> CheckIn {
        let r = Rating::new(3).unwrap();
        CheckIn::new(user(id), at(h), r, r, r, None).unwrap()
    }

    fn nudge(id: &str) -> Nudge {
        Nudge::new(user(id), DriftReportId::new(), NudgeLevel::Gentle, "Back to it", NudgeSource::Template, at(9))
            .unwrap()
    }

    #[tokio::test]
    async fn span_queries_are_half_open_and_sorted() {
        let repo = InMemorySignalRepository::new();
        for h in [12, 8, 10, 9] {
            repo.save_check_in(&check_in("u-1", h)).await.unwrap();
        }
        repo.save_check_in(&check_in("u-2", 9)).await.unwrap();

        let span = TimeSpan::new(*at(8).as_datetime(), *at(12).as_datetime()).unwrap();
        let found = repo.check_ins_in(&user("u-1"), span).await.unwrap();

        let hours: Vec<Timestamp> = found.iter().map(|c| c.recorded_at).collect();
        assert_eq!(hours, vec![at(8), at(9), at(10)]);
    }

    #[tokio::test]
    async fn nudges_are_only_visible_to_their_owner() {
        let repo = InMemorySignalRepository::new();
        let stored = nudge("u-1");
        repo.save_nudge(&stored).await.unwrap();

        assert!(repo.find_nudge(&user("u-1"), &stored.id).await.unwrap().is_some());
        assert!(repo.find_nudge(&user("u-2"), &stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_nudge_requires_existing() {
        let repo = InMemorySignalRepository::new();
        let err = repo.update_nudge(&nudge("u-1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NudgeNotFound);
    }
}
