//! Aggregate metrics over a [`Dataset`].
//!
//! Everything here is a pure function of the dataset; no state is kept between
//! calls and every reported figure is passed through `finite_or_zero`.

pub mod descriptive;
pub mod extrema;
pub mod trend;

use shared::models::{Metrics, MonthlyStats, SavingsStats, Trends};
use shared::utils::finite_or_zero;

use crate::error::EngineError;
use crate::models::Dataset;
use descriptive::SeriesSummary;

pub use trend::{aggregate_savings_rate, trend_rate};

pub fn compute_trends(dataset: &Dataset) -> Trends {
    let income = dataset.incomes();
    Trends {
        income_trend: trend_rate(&income),
        expense_trend: trend_rate(&dataset.expenses()),
        savings_rate: aggregate_savings_rate(&dataset.available(), &income),
    }
}

pub fn compute_monthly_stats(dataset: &Dataset) -> Result<MonthlyStats, EngineError> {
    let available = dataset.available();
    let savings = SeriesSummary::from_series(&available);
    let (best_month, worst_month) = extrema::best_and_worst(&dataset.labels(), &available)
        .ok_or_else(|| EngineError::InternalComputationError("no periods to rank".to_string()))?;

    Ok(MonthlyStats {
        income_stats: SeriesSummary::from_series(&dataset.incomes()).into(),
        expense_stats: SeriesSummary::from_series(&dataset.expenses()).into(),
        savings_stats: SavingsStats {
            mean: savings.mean,
            median: savings.median,
            std: savings.std,
            best_month,
            worst_month,
        },
    })
}

pub fn compute_metrics(dataset: &Dataset) -> Result<Metrics, EngineError> {
    dataset.ensure_not_empty()?;

    let available = dataset.available();
    let completion_date = dataset
        .records()
        .last()
        .map(|record| record.date.clone())
        .ok_or_else(|| EngineError::InternalComputationError("dataset contains no rows".to_string()))?;

    let min_payment = available.iter().copied().fold(f64::INFINITY, f64::min);
    let max_payment = available.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let metrics = Metrics {
        total_amount: finite_or_zero(available.iter().sum()),
        average_payment: descriptive::mean(&available),
        min_payment: finite_or_zero(min_payment),
        max_payment: finite_or_zero(max_payment),
        completion_date,
        total_months: dataset.len(),
        total_income: finite_or_zero(dataset.incomes().iter().sum()),
        total_expenses: finite_or_zero(dataset.expenses().iter().sum()),
        average_savings_rate: descriptive::mean(&dataset.savings_rates()),
        trends: compute_trends(dataset),
        monthly_stats: compute_monthly_stats(dataset)?,
    };

    tracing::debug!(
        total_amount = metrics.total_amount,
        average_payment = metrics.average_payment,
        total_months = metrics.total_months,
        average_savings_rate = metrics.average_savings_rate,
        "Computed metrics"
    );
    Ok(metrics)
}
