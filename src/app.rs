//! Composition root.
//!
//! Wires repositories and external providers into the application handlers
//! and groups them per endpoint module. Used by the binary with Postgres
//! adapters and by the integration tests with the in-memory ones.

use std::sync::Arc;

use crate::adapters::http::{
    ApiHandlers, PlanHandlers, ProfileHandlers, RewardHandlers, SignalHandlers, SyncHandlers,
};
use crate::application::handlers::{
    AcknowledgeNudgeHandler, ComputeWeeklyScoreHandler, ConnectCalendarHandler,
    CreateProfileHandler, DeleteProfileHandler, DisconnectCalendarHandler, GeneratePlanHandler,
    GetDailyInsightsHandler, GetPlanHandler, GetProfileHandler, ListBadgesHandler,
    ListSignalsHandler, RecordCheckInHandler, ReportDriftHandler, SyncDayHandler,
    UpdateBlockStatusHandler, UpdateProfileHandler,
};
use crate::application::{NudgeComposer, PlanComposer};
use crate::config::CoachingConfig;
use crate::ports::{
    AIProvider, CalendarProvider, ConnectionRepository, PlanRepository, ProfileRepository,
    RewardRepository, SecretCipher, SignalRepository,
};

/// Persistence ports.
#[derive(Clone)]
pub struct Repositories {
    pub profiles: Arc<dyn ProfileRepository>,
    pub plans: Arc<dyn PlanRepository>,
    pub signals: Arc<dyn SignalRepository>,
    pub rewards: Arc<dyn RewardRepository>,
    pub connections: Arc<dyn ConnectionRepository>,
}

/// External services.
#[derive(Clone)]
pub struct Services {
    pub calendar: Arc<dyn CalendarProvider>,
    pub cipher: Arc<dyn SecretCipher>,
    /// `None` runs every generation through the deterministic fallback.
    pub ai: Option<Arc<dyn AIProvider>>,
    pub ai_temperature: f32,
}

/// Builds every handler and groups them for the router.
pub fn build_handlers(repos: Repositories, services: Services, coaching: CoachingConfig) -> ApiHandlers {
    let plan_composer = Arc::new(
        PlanComposer::new(services.ai.clone(), coaching).with_temperature(services.ai_temperature),
    );
    let nudge_composer =
        Arc::new(NudgeComposer::new(services.ai).with_temperature(services.ai_temperature));

    let sync_day = Arc::new(SyncDayHandler::new(
        repos.profiles.clone(),
        repos.connections.clone(),
        services.calendar.clone(),
        services.cipher.clone(),
    ));

    let profile = ProfileHandlers::new(
        Arc::new(CreateProfileHandler::new(repos.profiles.clone())),
        Arc::new(GetProfileHandler::new(repos.profiles.clone())),
        Arc::new(UpdateProfileHandler::new(repos.profiles.clone())),
        Arc::new(DeleteProfileHandler::new(
            repos.profiles.clone(),
            repos.connections.clone(),
        )),
    );

    let plans = PlanHandlers::new(
        Arc::new(GeneratePlanHandler::new(
            repos.profiles.clone(),
            repos.plans.clone(),
            repos.signals.clone(),
            sync_day.clone(),
            plan_composer,
        )),
        Arc::new(GetPlanHandler::new(repos.plans.clone())),
        Arc::new(UpdateBlockStatusHandler::new(repos.plans.clone())),
    );

    let signals = SignalHandlers::new(
        Arc::new(RecordCheckInHandler::new(repos.signals.clone())),
        Arc::new(ReportDriftHandler::new(
            repos.profiles.clone(),
            repos.plans.clone(),
            repos.signals.clone(),
            nudge_composer,
            coaching.nudge_policy(),
        )),
        Arc::new(AcknowledgeNudgeHandler::new(repos.signals.clone())),
        Arc::new(ListSignalsHandler::new(
            repos.profiles.clone(),
            repos.signals.clone(),
        )),
    );

    let rewards = RewardHandlers::new(
        Arc::new(ComputeWeeklyScoreHandler::new(
            repos.profiles.clone(),
            repos.plans.clone(),
            repos.signals.clone(),
            repos.rewards.clone(),
        )),
        Arc::new(ListBadgesHandler::new(repos.rewards.clone())),
        Arc::new(GetDailyInsightsHandler::new(
            repos.profiles.clone(),
            repos.plans.clone(),
            repos.signals.clone(),
        )),
    );

    let sync = SyncHandlers::new(
        Arc::new(ConnectCalendarHandler::new(
            services.calendar,
            repos.connections.clone(),
            services.cipher,
        )),
        Arc::new(DisconnectCalendarHandler::new(repos.connections)),
        sync_day,
    );

    ApiHandlers {
        profile,
        plans,
        signals,
        rewards,
        sync,
    }
}
