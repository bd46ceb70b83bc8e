//! ListSignalsHandler - Everything recorded during one local day.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::application::handlers::local_day;
use crate::application::handlers::profile::load_profile;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::signals::{CheckIn, DriftReport, Nudge};
use crate::ports::{ProfileRepository, SignalRepository};

#[derive(Debug, Clone, Copy)]
pub struct ListSignalsQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySignals {
    pub date: NaiveDate,
    pub check_ins: Vec<CheckIn>,
    pub drift_reports: Vec<DriftReport>,
    pub nudges: Vec<Nudge>,
}

pub struct ListSignalsHandler {
    profiles: Arc<dyn ProfileRepository>,
    signals: Arc<dyn SignalRepository>,
}

impl ListSignalsHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>, signals: Arc<dyn SignalRepository>) -> Self {
        Self { profiles, signals }
    }

    pub async fn handle(
        &self,
        query: ListSignalsQuery,
        user_id: &UserId,
    ) -> Result<DailySignals, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), user_id).await?;
        let day = local_day(profile.utc_offset(), query.date)?;

        Ok(DailySignals {
            date: query.date,
            check_ins: self.signals.check_ins_in(user_id, day).await?,
            drift_reports: self.signals.drift_reports_in(user_id, day).await?,
            nudges: self.signals.nudges_in(user_id, day).await?,
        })
    }
}
