// Engine library root
// Load -> normalize -> schedule -> statistics -> assemble, plus the seasonal planner.

pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod planner;
pub mod schedule;
pub mod services;
pub mod stats;

pub use error::{exit_code_for_status, EngineError, ErrorClass};
pub use services::ScheduleService;
