use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the derived schedule. `payment` is the period's available money and
/// `remaining_balance` the running total up to and including this period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub date: String,
    pub payment: f64,
    pub remaining_balance: f64,
    pub savings_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    pub income_trend: f64,
    pub expense_trend: f64,
    pub savings_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub growth: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub best_month: String,
    pub worst_month: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub income_stats: SeriesStats,
    pub expense_stats: SeriesStats,
    pub savings_stats: SavingsStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub total_amount: f64,
    pub average_payment: f64,
    pub min_payment: f64,
    pub max_payment: f64,
    pub completion_date: String,
    pub total_months: usize,
    pub total_income: f64,
    pub total_expenses: f64,
    pub average_savings_rate: f64,
    pub trends: Trends,
    pub monthly_stats: MonthlyStats,
}

/// Successful response body: aggregate metrics plus the ordered schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub metrics: Metrics,
    pub data: Vec<ScheduleRow>,
}

/// Failure response body. `details` is only filled for internal failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    High,
    Low,
    /// Calendar month with no income history, paid at the base amount. Kept apart from
    /// `Low` so a reader can tell a reduced payment from an unadjusted one.
    Regular,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedPayment {
    pub date: NaiveDate,
    pub payment: f64,
    pub remaining_balance: f64,
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    pub total_payments: f64,
    pub average_payment: f64,
    pub min_payment: f64,
    pub max_payment: f64,
    pub completion_date: NaiveDate,
    pub total_months: usize,
}
