//! ReportDriftHandler - Stores a drift report and decides on a nudge.
//!
//! The report is always stored. Whether a nudge follows, and how firm it
//! is, comes from `NudgePolicy` over the user's recent drifts and nudges.

use serde::Serialize;
use std::sync::Arc;

use crate::application::coaching::{NudgeComposer, NudgeRequest};
use crate::application::handlers::profile::load_profile;
use crate::domain::foundation::{BlockId, CommandMetadata, DomainError, TimeSpan, Timestamp};
use crate::domain::profile::UserProfile;
use crate::domain::signals::{
    DriftReport, DriftTrigger, Nudge, NudgeDecision, NudgePolicy, SuppressionReason,
};
use crate::ports::{PlanRepository, ProfileRepository, SignalRepository};

#[derive(Debug, Clone)]
pub struct ReportDriftCommand {
    /// When the drift began; defaults to `minutes` before the report.
    pub started_at: Option<Timestamp>,
    pub minutes: u32,
    pub trigger: DriftTrigger,
    /// Plan block the user drifted away from.
    pub block_id: Option<BlockId>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportDriftResult {
    pub report: DriftReport,
    pub nudge: Option<Nudge>,
    /// Set when the policy decided against a nudge.
    pub suppressed: Option<SuppressionReason>,
}

pub struct ReportDriftHandler {
    profiles: Arc<dyn ProfileRepository>,
    plans: Arc<dyn PlanRepository>,
    signals: Arc<dyn SignalRepository>,
    composer: Arc<NudgeComposer>,
    policy: NudgePolicy,
}

impl ReportDriftHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        plans: Arc<dyn PlanRepository>,
        signals: Arc<dyn SignalRepository>,
        composer: Arc<NudgeComposer>,
        policy: NudgePolicy,
    ) -> Self {
        Self {
            profiles,
            plans,
            signals,
            composer,
            policy,
        }
    }

    pub async fn handle(
        &self,
        cmd: ReportDriftCommand,
        metadata: CommandMetadata,
    ) -> Result<ReportDriftResult, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), &metadata.user_id).await?;
        let now = metadata.now();

        let started_at = cmd
            .started_at
            .unwrap_or_else(|| now.minus_minutes(cmd.minutes as i64));
        if started_at.is_after(&now) {
            return Err(DomainError::validation(
                "started_at",
                "Drift cannot start in the future",
            ));
        }

        let report = DriftReport::new(
            metadata.user_id.clone(),
            started_at,
            cmd.minutes,
            cmd.trigger,
            cmd.block_id,
            cmd.note,
            now,
        )?;
        self.signals.save_drift_report(&report).await?;

        let recent_drifts = self
            .signals
            .drift_reports_in(&metadata.user_id, trailing(now, self.policy.escalation_window_minutes)?)
            .await?;
        let recent_nudges = self
            .signals
            .nudges_in(&metadata.user_id, trailing(now, self.policy.cooldown_minutes)?)
            .await?;

        let level = match self.policy.decide(
            profile.nudges_enabled(),
            &report,
            &recent_drifts,
            &recent_nudges,
        ) {
            NudgeDecision::Send(level) => level,
            NudgeDecision::Suppressed(reason) => {
                tracing::info!(
                    user_id = %metadata.user_id,
                    drift_report_id = %report.id,
                    reason = ?reason,
                    "nudge suppressed"
                );
                return Ok(ReportDriftResult {
                    report,
                    nudge: None,
                    suppressed: Some(reason),
                });
            }
        };

        let block_title = self.block_title(&profile, &report).await?;
        let composed = self
            .composer
            .compose(
                NudgeRequest {
                    profile: &profile,
                    level,
                    drift: &report,
                    block_title: block_title.as_deref(),
                },
                &metadata,
            )
            .await;

        let nudge = Nudge::new(
            metadata.user_id.clone(),
            report.id,
            level,
            &composed.message,
            composed.source,
            now,
        )?;
        self.signals.save_nudge(&nudge).await?;

        tracing::info!(
            user_id = %metadata.user_id,
            drift_report_id = %report.id,
            level = level.as_str(),
            source = nudge.source.as_str(),
            "nudge sent"
        );

        Ok(ReportDriftResult {
            report,
            nudge: Some(nudge),
            suppressed: None,
        })
    }

    /// Title of the referenced block in the plan of the drift's local day.
    async fn block_title(
        &self,
        profile: &UserProfile,
        report: &DriftReport,
    ) -> Result<Option<String>, DomainError> {
        let Some(block_id) = &report.block_id else {
            return Ok(None);
        };
        let date = profile.utc_offset().local_date(report.started_at.as_datetime());
        let plan = self.plans.find_by_date(profile.user_id(), date).await?;
        Ok(plan.and_then(|p| p.block(block_id).map(|b| b.title.clone())))
    }
}

/// `[now - minutes, now]`, inclusive of records stamped exactly `now`.
fn trailing(now: Timestamp, minutes: i64) -> Result<TimeSpan, DomainError> {
    Ok(TimeSpan::new(
        *now.minus_minutes(minutes).as_datetime(),
        *now.plus_secs(1).as_datetime(),
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::memory::{
        InMemoryPlanRepository, InMemoryProfileRepository, InMemorySignalRepository,
    };
    use crate::application::test_support::{at, metadata_at, monday, profile};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::plan::{BlockKind, DailyPlan, PlanSource, ScheduleBlock};
    use crate::domain::profile::ProfilePatch;
    use crate::domain::signals::{NudgeLevel, NudgeSource};

    struct Fixture {
        profiles: InMemoryProfileRepository,
        plans: InMemoryPlanRepository,
        signals: InMemorySignalRepository,
    }

    impl Fixture {
        async fn new() -> Self {
            let profiles = InMemoryProfileRepository::new();
            profiles.create(&profile()).await.unwrap();
            Self {
                profiles,
                plans: InMemoryPlanRepository::new(),
                signals: InMemorySignalRepository::new(),
            }
        }

        fn handler(&self, ai: Option<MockAIProvider>) -> ReportDriftHandler {
            let ai = ai.map(|p| Arc::new(p) as Arc<dyn crate::ports::AIProvider>);
            ReportDriftHandler::new(
                Arc::new(self.profiles.clone()),
                Arc::new(self.plans.clone()),
                Arc::new(self.signals.clone()),
                Arc::new(NudgeComposer::new(ai)),
                NudgePolicy::default(),
            )
        }
    }

    fn drift(minutes: u32) -> ReportDriftCommand {
        ReportDriftCommand {
            started_at: None,
            minutes,
            trigger: DriftTrigger::SocialMedia,
            block_id: None,
            note: None,
        }
    }

    #[tokio::test]
    async fn first_drift_gets_gentle_template_nudge() {
        let fixture = Fixture::new().await;
        let now = at(monday(), 10, 0);

        let result = fixture.handler(None).handle(drift(15), metadata_at(now)).await.unwrap();

        assert_eq!(result.report.started_at, at(monday(), 9, 45));
        let nudge = result.nudge.unwrap();
        assert_eq!(nudge.level, NudgeLevel::Gentle);
        assert_eq!(nudge.source, NudgeSource::Template);
        assert_eq!(nudge.drift_report_id, result.report.id);
        assert_eq!(fixture.signals.nudge_count().await, 1);
    }

    #[tokio::test]
    async fn escalates_and_respects_cooldown() {
        let fixture = Fixture::new().await;
        let handler = fixture.handler(None);

        let first = handler.handle(drift(10), metadata_at(at(monday(), 10, 0))).await.unwrap();
        assert_eq!(first.nudge.unwrap().level, NudgeLevel::Gentle);

        // Within the 10 minute cooldown: stored but silent.
        let second = handler.handle(drift(5), metadata_at(at(monday(), 10, 5))).await.unwrap();
        assert!(second.nudge.is_none());
        assert_eq!(second.suppressed, Some(SuppressionReason::Cooldown));

        // Third drift in the window once the cooldown has passed.
        let third = handler.handle(drift(5), metadata_at(at(monday(), 10, 30))).await.unwrap();
        assert_eq!(third.nudge.unwrap().level, NudgeLevel::Reset);
    }

    #[tokio::test]
    async fn long_drift_is_reset() {
        let fixture = Fixture::new().await;

        let result = fixture
            .handler(None)
            .handle(drift(50), metadata_at(at(monday(), 11, 0)))
            .await
            .unwrap();

        assert_eq!(result.nudge.unwrap().level, NudgeLevel::Reset);
    }

    #[tokio::test]
    async fn disabled_nudges_still_store_report() {
        let fixture = Fixture::new().await;
        let mut profile = profile();
        profile
            .apply(
                ProfilePatch {
                    nudges_enabled: Some(false),
                    ..Default::default()
                },
                at(monday(), 6, 0),
            )
            .unwrap();
        fixture.profiles.update(&profile).await.unwrap();
        let now = at(monday(), 10, 0);

        let result = fixture.handler(None).handle(drift(15), metadata_at(now)).await.unwrap();

        assert_eq!(result.suppressed, Some(SuppressionReason::Disabled));
        assert_eq!(fixture.signals.nudge_count().await, 0);
        let day = TimeSpan::starting_at(*at(monday(), 0, 0).as_datetime(), 24 * 60).unwrap();
        let stored = fixture.signals.drift_reports_in(profile.user_id(), day).await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn model_nudge_mentions_block() {
        let fixture = Fixture::new().await;
        let span = TimeSpan::starting_at(*at(monday(), 9, 0).as_datetime(), 90).unwrap();
        let block = ScheduleBlock::new(BlockKind::Task, "Write report", span);
        let block_id = block.id;
        let plan = DailyPlan::new(
            profile().user_id().clone(),
            monday(),
            vec![block],
            PlanSource::Fallback,
            "",
            vec![],
            at(monday(), 7, 0),
        )
        .unwrap();
        fixture.plans.save(&plan).await.unwrap();
        let ai = MockAIProvider::new().with_response(r#"{"message": "The report is waiting."}"#);

        let mut cmd = drift(10);
        cmd.block_id = Some(block_id);
        let result = fixture
            .handler(Some(ai.clone()))
            .handle(cmd, metadata_at(at(monday(), 9, 40)))
            .await
            .unwrap();

        let nudge = result.nudge.unwrap();
        assert_eq!(nudge.source, NudgeSource::Ai);
        assert_eq!(nudge.message, "The report is waiting.");
        assert!(ai.get_calls()[0].messages[0].content.contains("\"Write report\""));
    }

    #[tokio::test]
    async fn rejects_future_start_and_bad_minutes() {
        let fixture = Fixture::new().await;
        let handler = fixture.handler(None);
        let now = at(monday(), 10, 0);

        let mut future = drift(10);
        future.started_at = Some(now.plus_minutes(5));
        let err = handler.handle(future, metadata_at(now)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);

        let err = handler.handle(drift(0), metadata_at(now)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
