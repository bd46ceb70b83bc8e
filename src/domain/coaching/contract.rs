//! JSON contracts the model must answer with.
//!
//! Plan: `{"summary": str, "blocks": [{"title", "kind", "start": "HH:MM",
//! "end": "HH:MM", "task_id"?}]}` in the user's local time.
//! Nudge: `{"message": str}`.
//!
//! Markdown code fences and stray prose around the JSON object are tolerated.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::calendar::ExternalTask;
use crate::domain::foundation::{TimeSpan, UtcOffset};
use crate::domain::plan::{BlockKind, ScheduleBlock};
use crate::domain::profile::parse_clock_time;
use crate::domain::signals::validate_message;

/// Model output that does not honour the contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContractError {
    #[error("output is not valid contract JSON: {0}")]
    Json(String),

    #[error("block '{title}' is invalid: {reason}")]
    InvalidBlock { title: String, reason: String },

    #[error("plan contains no blocks")]
    EmptyPlan,

    #[error("nudge message is invalid: {0}")]
    InvalidMessage(String),
}

#[derive(Debug, Deserialize)]
struct PlanContract {
    #[serde(default)]
    summary: String,
    blocks: Vec<BlockContract>,
}

#[derive(Debug, Deserialize)]
struct BlockContract {
    title: String,
    kind: String,
    start: String,
    end: String,
    #[serde(default)]
    task_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NudgeContract {
    message: String,
}

/// A model plan converted into domain blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPlan {
    pub summary: String,
    pub blocks: Vec<ScheduleBlock>,
}

/// Removes Markdown code fences and any text around the outermost JSON object.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let body = rest.split_once('\n').map(|(_, body)| body).unwrap_or(rest);
            body.trim_end().strip_suffix("```").unwrap_or(body).trim()
        }
        None => trimmed,
    };

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if end > start => &unfenced[start..=end],
        _ => unfenced,
    }
}

/// Parses a plan for local `date`.
///
/// Task ids the model invents (not in `tasks`) are dropped from the block.
pub fn parse_plan(
    text: &str,
    date: NaiveDate,
    offset: UtcOffset,
    tasks: &[ExternalTask],
) -> Result<ParsedPlan, ContractError> {
    let contract: PlanContract = serde_json::from_str(extract_json(text))
        .map_err(|e| ContractError::Json(e.to_string()))?;

    if contract.blocks.is_empty() {
        return Err(ContractError::EmptyPlan);
    }

    let blocks = contract
        .blocks
        .into_iter()
        .map(|raw| to_block(raw, date, offset, tasks))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ParsedPlan {
        summary: contract.summary.trim().to_string(),
        blocks,
    })
}

/// Parses and validates a nudge message.
pub fn parse_nudge(text: &str) -> Result<String, ContractError> {
    let contract: NudgeContract = serde_json::from_str(extract_json(text))
        .map_err(|e| ContractError::Json(e.to_string()))?;
    validate_message(&contract.message).map_err(|e| ContractError::InvalidMessage(e.message))
}

fn to_block(
    raw: BlockContract,
    date: NaiveDate,
    offset: UtcOffset,
    tasks: &[ExternalTask],
) -> Result<ScheduleBlock, ContractError> {
    let title = raw.title.trim().to_string();
    let invalid = |reason: String| ContractError::InvalidBlock {
        title: title.clone(),
        reason,
    };

    if title.is_empty() {
        return Err(invalid("title is empty".into()));
    }
    let kind = raw.kind.parse::<BlockKind>().map_err(|e| invalid(e.to_string()))?;
    let start = parse_clock_time("start", &raw.start).map_err(|e| invalid(e.to_string()))?;
    let end = parse_clock_time("end", &raw.end).map_err(|e| invalid(e.to_string()))?;
    let span = TimeSpan::new(offset.to_utc(date, start), offset.to_utc(date, end))
        .map_err(|e| invalid(e.to_string()))?;

    let mut block = ScheduleBlock::new(kind, title.clone(), span);
    if let Some(task_id) = raw.task_id.filter(|id| tasks.iter().any(|t| &t.external_id == id)) {
        block = block.with_task_ref(task_id);
    }
    Ok(block)
}
