//! GetDailyInsightsHandler - Drift, focus and burnout view of one local day.

use chrono::{Duration, NaiveDate};
use std::sync::Arc;

use crate::application::handlers::local_day;
use crate::application::handlers::profile::load_profile;
use crate::domain::foundation::{DomainError, TimeSpan, UserId};
use crate::domain::rewards::{DailyInsights, DayActivity};
use crate::domain::signals::MAX_DRIFT_MINUTES;
use crate::ports::{PlanRepository, ProfileRepository, SignalRepository};

#[derive(Debug, Clone, Copy)]
pub struct GetDailyInsightsQuery {
    pub date: NaiveDate,
}

pub struct GetDailyInsightsHandler {
    profiles: Arc<dyn ProfileRepository>,
    plans: Arc<dyn PlanRepository>,
    signals: Arc<dyn SignalRepository>,
}

impl GetDailyInsightsHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        plans: Arc<dyn PlanRepository>,
        signals: Arc<dyn SignalRepository>,
    ) -> Self {
        Self {
            profiles,
            plans,
            signals,
        }
    }

    pub async fn handle(
        &self,
        query: GetDailyInsightsQuery,
        user_id: &UserId,
    ) -> Result<DailyInsights, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), user_id).await?;
        let day = local_day(profile.utc_offset(), query.date)?;

        let plan = self.plans.find_by_date(user_id, query.date).await?;
        let check_ins = self.signals.check_ins_in(user_id, day).await?;
        // Drifts from the evening before may still run into this day.
        let drift_lookback = TimeSpan::new(
            day.start() - Duration::minutes(MAX_DRIFT_MINUTES as i64),
            day.end(),
        )?;
        let drifts = self.signals.drift_reports_in(user_id, drift_lookback).await?;

        let insights = DailyInsights::compute(&DayActivity {
            date: query.date,
            utc_offset: profile.utc_offset(),
            work_hours: profile.work_hours(),
            plan: plan.as_ref(),
            check_ins: &check_ins,
            drifts: &drifts,
        })?;

        tracing::debug!(
            user_id = %user_id,
            date = %query.date,
            burnout = ?insights.burnout.level,
            "daily insights computed"
        );

        Ok(insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryPlanRepository, InMemoryProfileRepository, InMemorySignalRepository,
    };
    use crate::application::test_support::{at, monday, profile, user};
    use crate::domain::foundation::{ErrorCode, Rating, TimeSpan};
    use crate::domain::plan::{BlockKind, BlockStatus, DailyPlan, PlanSource, ScheduleBlock};
    use crate::domain::rewards::BurnoutLevel;
    use crate::domain::signals::{CheckIn, DriftReport, DriftTrigger};

    #[tokio::test]
    async fn combines_plan_and_signals_of_the_day() {
        let profiles = InMemoryProfileRepository::new();
        profiles.create(&profile()).await.unwrap();
        let plans = InMemoryPlanRepository::new();
        let signals = InMemorySignalRepository::new();

        let span = TimeSpan::starting_at(*at(monday(), 9, 0).as_datetime(), 120).unwrap();
        let mut block = ScheduleBlock::new(BlockKind::Focus, "Deep work", span);
        block.status = BlockStatus::Completed;
        block.completed_at = Some(at(monday(), 11, 0));
        let plan = DailyPlan::new(
            user(),
            monday(),
            vec![block],
            PlanSource::Fallback,
            "",
            vec![],
            at(monday(), 7, 0),
        )
        .unwrap();
        plans.save(&plan).await.unwrap();

        let low = Rating::new(2).unwrap();
        let check_in = CheckIn::new(user(), at(monday(), 12, 0), low, low, low, None).unwrap();
        signals.save_check_in(&check_in).await.unwrap();
        let drift = DriftReport::new(
            user(),
            at(monday(), 14, 0),
            25,
            DriftTrigger::Video,
            None,
            None,
            at(monday(), 14, 25),
        )
        .unwrap();
        signals.save_drift_report(&drift).await.unwrap();

        let insights = GetDailyInsightsHandler::new(
            Arc::new(profiles),
            Arc::new(plans),
            Arc::new(signals),
        )
        .handle(GetDailyInsightsQuery { date: monday() }, &user())
        .await
        .unwrap();

        assert_eq!(insights.drift_minutes, 25);
        assert_eq!(insights.drift_events, 1);
        assert_eq!(insights.planned_blocks, 1);
        assert_eq!(insights.completed_blocks, 1);
        let peak = insights.peak_focus_window.unwrap();
        assert_eq!(peak.start_hour, 9);
        // Low energy (+2) and low mood (+1).
        assert_eq!(insights.burnout.level, BurnoutLevel::Moderate);
    }

    #[tokio::test]
    async fn drift_from_previous_evening_shows_in_early_hours() {
        let profiles = InMemoryProfileRepository::new();
        profiles.create(&profile()).await.unwrap();
        let signals = InMemorySignalRepository::new();
        let sunday = monday().pred_opt().unwrap();
        let drift = DriftReport::new(
            user(),
            at(sunday, 23, 30),
            60,
            DriftTrigger::Video,
            None,
            None,
            at(monday(), 0, 30),
        )
        .unwrap();
        signals.save_drift_report(&drift).await.unwrap();

        let insights = GetDailyInsightsHandler::new(
            Arc::new(profiles),
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(signals),
        )
        .handle(GetDailyInsightsQuery { date: monday() }, &user())
        .await
        .unwrap();

        assert_eq!(insights.drift_events, 0);
        assert_eq!(insights.hourly.len(), 1);
        assert_eq!(insights.hourly[0].hour, 0);
        assert_eq!(insights.hourly[0].drift_minutes, 30);
    }

    #[tokio::test]
    async fn requires_profile() {
        let handler = GetDailyInsightsHandler::new(
            Arc::new(InMemoryProfileRepository::new()),
            Arc::new(InMemoryPlanRepository::new()),
            Arc::new(InMemorySignalRepository::new()),
        );

        let err = handler
            .handle(GetDailyInsightsQuery { date: monday() }, &user())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }
}
