//! Coaching module - what the model is asked and what it must answer.
//!
//! Prompt assembly, the JSON contracts for plans and nudges, and the
//! deterministic texts used on the fallback path. Provider calls live in the
//! application layer behind the `AIProvider` port.

mod contract;
mod prompts;
mod templates;

pub use contract::{extract_json, parse_nudge, parse_plan, ContractError, ParsedPlan};
pub use prompts::{nudge_prompt, plan_prompt, system_prompt, NudgePromptInput, PlanPromptInput};
pub use templates::{fallback_summary, template_nudge};
