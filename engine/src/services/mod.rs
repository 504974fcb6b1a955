// Request handling layered over the engine modules.
pub mod schedule_service;

pub use schedule_service::{into_http_parts, RepaymentPlanResponse, ScheduleService};
