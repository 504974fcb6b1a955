// Seasonal repayment planning on top of the income history.
pub mod repayment;
pub mod seasons;

pub use repayment::{plan_metrics, RepaymentPlanner};
pub use seasons::{detect_seasons, IncomeProfile, Seasons};
