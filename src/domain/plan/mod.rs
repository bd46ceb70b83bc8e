//! Plan domain module.
//!
//! A `DailyPlan` is the schedule of one local day: meetings from the
//! calendar, task blocks, deep-work blocks and breaks. Plans come from the
//! model or from the deterministic `fallback_schedule`.

mod aggregate;
mod block;
mod scheduler;

pub use aggregate::{DailyPlan, PlanSource, UnscheduledTask};
pub use block::{BlockKind, BlockStatus, ScheduleBlock};
pub use scheduler::{
    fallback_schedule, ScheduleOutcome, SchedulingInput, BREAK_TITLE, DEEP_WORK_TITLE,
};
