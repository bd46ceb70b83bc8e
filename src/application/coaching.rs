//! Coaching composers - model-backed generation with a deterministic fallback.
//!
//! `PlanComposer` and `NudgeComposer` are the only callers of the
//! `AIProvider` port. Both always produce a result: when no provider is
//! configured, the call fails, or the answer breaks the JSON contract or the
//! plan invariants, the deterministic scheduler or the message templates are
//! used instead and the failure is only logged.

use chrono::NaiveDate;
use std::sync::Arc;

use crate::config::CoachingConfig;
use crate::domain::calendar::{ExternalTask, SyncSnapshot};
use crate::domain::coaching::{
    fallback_summary, nudge_prompt, parse_nudge, parse_plan, plan_prompt, system_prompt,
    template_nudge, NudgePromptInput, PlanPromptInput,
};
use crate::domain::foundation::{CommandMetadata, DomainError};
use crate::domain::plan::{
    fallback_schedule, DailyPlan, PlanSource, ScheduleBlock, SchedulingInput, UnscheduledTask,
};
use crate::domain::profile::UserProfile;
use crate::domain::signals::{DriftReport, NudgeLevel, NudgeSource};
use crate::ports::{AIProvider, CompletionRequest, GenerationPurpose, MessageRole, RequestMetadata};

const PLAN_MAX_TOKENS: u32 = 1_500;
const NUDGE_MAX_TOKENS: u32 = 200;
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Everything needed to plan one local day.
#[derive(Debug, Clone, Copy)]
pub struct PlanRequest<'a> {
    pub profile: &'a UserProfile,
    pub date: NaiveDate,
    pub snapshot: &'a SyncSnapshot,
    /// Mean energy rating of recent check-ins.
    pub energy_average: Option<f64>,
}

/// Builds daily plans.
pub struct PlanComposer {
    ai: Option<Arc<dyn AIProvider>>,
    settings: CoachingConfig,
    temperature: f32,
}

impl PlanComposer {
    pub fn new(ai: Option<Arc<dyn AIProvider>>, settings: CoachingConfig) -> Self {
        Self {
            ai,
            settings,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Produces the plan for `request.date`, never failing on model errors.
    ///
    /// # Errors
    ///
    /// Only when the deterministic schedule itself cannot be built.
    pub async fn compose(
        &self,
        request: PlanRequest<'_>,
        metadata: &CommandMetadata,
    ) -> Result<DailyPlan, DomainError> {
        let profile = request.profile;
        let now = metadata.now();
        let tasks: Vec<_> = request.snapshot.open_tasks().cloned().collect();

        if let Some(ai) = &self.ai {
            match self.ask_model(ai.as_ref(), &request, &tasks, metadata).await {
                Ok((summary, blocks)) => {
                    let unscheduled = unplaced_tasks(&tasks, &blocks, self.settings.default_task_minutes);
                    match DailyPlan::new(
                        profile.user_id().clone(),
                        request.date,
                        blocks,
                        PlanSource::Ai,
                        summary,
                        unscheduled,
                        now,
                    ) {
                        Ok(plan) => return Ok(plan),
                        Err(err) => tracing::warn!(
                            date = %request.date,
                            error = %err,
                            "model plan violates plan invariants; using fallback"
                        ),
                    }
                }
                Err(reason) => tracing::warn!(
                    date = %request.date,
                    reason = %reason,
                    "model plan unavailable; using fallback"
                ),
            }
        }

        let outcome = fallback_schedule(&SchedulingInput {
            date: request.date,
            utc_offset: profile.utc_offset(),
            work_hours: profile.work_hours(),
            focus_block_minutes: profile.focus_block_minutes() as i64,
            break_minutes: profile.break_minutes() as i64,
            default_task_minutes: self.settings.default_task_minutes,
            min_focus_block_minutes: self.settings.min_focus_block_minutes,
            now,
            events: &request.snapshot.events,
            tasks: &tasks,
        })?;
        let summary = fallback_summary(&outcome);

        tracing::info!(
            date = %request.date,
            blocks = outcome.blocks.len(),
            unscheduled = outcome.unscheduled.len(),
            "fallback plan composed"
        );

        DailyPlan::new(
            profile.user_id().clone(),
            request.date,
            outcome.blocks,
            PlanSource::Fallback,
            summary,
            outcome.unscheduled,
            now,
        )
    }

    async fn ask_model(
        &self,
        ai: &dyn AIProvider,
        request: &PlanRequest<'_>,
        tasks: &[ExternalTask],
        metadata: &CommandMetadata,
    ) -> Result<(String, Vec<ScheduleBlock>), String> {
        let profile = request.profile;
        let window = profile
            .work_hours()
            .window(request.date, profile.utc_offset())
            .map_err(|e| e.to_string())?;

        let prompt = plan_prompt(&PlanPromptInput {
            display_name: profile.display_name(),
            date: request.date,
            utc_offset: profile.utc_offset(),
            window,
            focus_block_minutes: profile.focus_block_minutes(),
            break_minutes: profile.break_minutes(),
            default_task_minutes: self.settings.default_task_minutes,
            events: &request.snapshot.events,
            tasks,
            energy_average: request.energy_average,
        });

        let completion = CompletionRequest::new(RequestMetadata::new(
            metadata.user_id.clone(),
            GenerationPurpose::DailyPlan,
            metadata.correlation_id(),
        ))
        .with_system_prompt(system_prompt(profile.coaching_tone()))
        .with_message(MessageRole::User, prompt)
        .with_max_tokens(PLAN_MAX_TOKENS)
        .with_temperature(self.temperature)
        .with_json_output();

        let response = ai.complete(completion).await.map_err(|e| e.to_string())?;
        let parsed = parse_plan(&response.content, request.date, profile.utc_offset(), tasks)
            .map_err(|e| e.to_string())?;

        tracing::debug!(
            model = %response.model,
            tokens = response.usage.total_tokens,
            blocks = parsed.blocks.len(),
            "model plan parsed"
        );

        let summary = if parsed.summary.is_empty() {
            format!("Plan for {}", request.date)
        } else {
            parsed.summary
        };
        Ok((summary, parsed.blocks))
    }
}

/// Open tasks not referenced by any block.
fn unplaced_tasks(
    tasks: &[ExternalTask],
    blocks: &[ScheduleBlock],
    default_minutes: u32,
) -> Vec<UnscheduledTask> {
    tasks
        .iter()
        .filter(|t| !blocks.iter().any(|b| b.task_ref.as_deref() == Some(t.external_id.as_str())))
        .map(|t| UnscheduledTask {
            task_id: t.external_id.clone(),
            title: t.title.clone(),
            estimate_minutes: t.effective_estimate(default_minutes),
        })
        .collect()
}

/// Inputs for one nudge message.
#[derive(Debug, Clone, Copy)]
pub struct NudgeRequest<'a> {
    pub profile: &'a UserProfile,
    pub level: NudgeLevel,
    pub drift: &'a DriftReport,
    /// Title of the block the user drifted from, if known.
    pub block_title: Option<&'a str>,
}

/// A nudge text and who wrote it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedNudge {
    pub message: String,
    pub source: NudgeSource,
}

/// Writes nudge messages.
pub struct NudgeComposer {
    ai: Option<Arc<dyn AIProvider>>,
    temperature: f32,
}

impl NudgeComposer {
    pub fn new(ai: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            ai,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub async fn compose(&self, request: NudgeRequest<'_>, metadata: &CommandMetadata) -> ComposedNudge {
        if let Some(ai) = &self.ai {
            match self.ask_model(ai.as_ref(), &request, metadata).await {
                Ok(message) => {
                    return ComposedNudge {
                        message,
                        source: NudgeSource::Ai,
                    }
                }
                Err(reason) => tracing::warn!(
                    level = request.level.as_str(),
                    reason = %reason,
                    "model nudge unavailable; using template"
                ),
            }
        }

        ComposedNudge {
            message: template_nudge(
                request.level,
                request.profile.coaching_tone(),
                request.drift,
                request.block_title,
            ),
            source: NudgeSource::Template,
        }
    }

    async fn ask_model(
        &self,
        ai: &dyn AIProvider,
        request: &NudgeRequest<'_>,
        metadata: &CommandMetadata,
    ) -> Result<String, String> {
        let profile = request.profile;
        let prompt = nudge_prompt(&NudgePromptInput {
            display_name: profile.display_name(),
            level: request.level,
            utc_offset: profile.utc_offset(),
            drift: request.drift,
            block_title: request.block_title,
        });

        let completion = CompletionRequest::new(RequestMetadata::new(
            metadata.user_id.clone(),
            GenerationPurpose::Nudge,
            metadata.correlation_id(),
        ))
        .with_system_prompt(system_prompt(profile.coaching_tone()))
        .with_message(MessageRole::User, prompt)
        .with_max_tokens(NUDGE_MAX_TOKENS)
        .with_temperature(self.temperature)
        .with_json_output();

        let response = ai.complete(completion).await.map_err(|e| e.to_string())?;
        parse_nudge(&response.content).map_err(|e| e.to_string())
    }
}
