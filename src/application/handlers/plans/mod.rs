//! Daily plan handlers.

mod generate_plan;
mod get_plan;
mod update_block_status;

pub use generate_plan::{GeneratePlanCommand, GeneratePlanHandler, ENERGY_LOOKBACK_DAYS};
pub use get_plan::{GetPlanHandler, GetPlanQuery};
pub use update_block_status::{UpdateBlockStatusCommand, UpdateBlockStatusHandler};
