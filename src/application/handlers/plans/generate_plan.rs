//! GeneratePlanHandler - Builds and stores the plan for one local day.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::coaching::{PlanComposer, PlanRequest};
use crate::application::handlers::profile::load_profile;
use crate::application::handlers::sync::SyncDayHandler;
use crate::domain::foundation::{CommandMetadata, DomainError, TimeSpan};
use crate::domain::plan::DailyPlan;
use crate::domain::signals::average_rating;
use crate::ports::{PlanRepository, ProfileRepository, SignalRepository};

/// Check-ins older than this do not inform the energy average.
pub const ENERGY_LOOKBACK_DAYS: i64 = 7;

/// Command to (re)generate the plan for a local date.
#[derive(Debug, Clone, Copy)]
pub struct GeneratePlanCommand {
    pub date: NaiveDate,
}

/// Handler for plan generation.
pub struct GeneratePlanHandler {
    profiles: Arc<dyn ProfileRepository>,
    plans: Arc<dyn PlanRepository>,
    signals: Arc<dyn SignalRepository>,
    sync: Arc<SyncDayHandler>,
    composer: Arc<PlanComposer>,
}

impl GeneratePlanHandler {
    pub fn new(
        profiles: Arc<dyn ProfileRepository>,
        plans: Arc<dyn PlanRepository>,
        signals: Arc<dyn SignalRepository>,
        sync: Arc<SyncDayHandler>,
        composer: Arc<PlanComposer>,
    ) -> Self {
        Self {
            profiles,
            plans,
            signals,
            sync,
            composer,
        }
    }

    pub async fn handle(
        &self,
        cmd: GeneratePlanCommand,
        metadata: CommandMetadata,
    ) -> Result<DailyPlan, DomainError> {
        let profile = load_profile(self.profiles.as_ref(), &metadata.user_id).await?;
        let snapshot = self.sync.snapshot(&profile, cmd.date, &metadata).await?;

        let now = metadata.now();
        let lookback = TimeSpan::new(
            *now.minus_days(ENERGY_LOOKBACK_DAYS).as_datetime(),
            *now.plus_secs(1).as_datetime(),
        )?;
        let check_ins = self.signals.check_ins_in(&metadata.user_id, lookback).await?;
        let energy_average = average_rating(&check_ins, |c| c.energy);

        let plan = self
            .composer
            .compose(
                PlanRequest {
                    profile: &profile,
                    date: cmd.date,
                    snapshot: &snapshot,
                    energy_average,
                },
                &metadata,
            )
            .await?;

        self.plans.save(&plan).await?;

        tracing::info!(
            user_id = %metadata.user_id,
            date = %cmd.date,
            source = plan.source().as_str(),
            blocks = plan.blocks().len(),
            correlation_id = %metadata.correlation_id(),
            "plan generated"
        );

        Ok(plan)
    }
}
