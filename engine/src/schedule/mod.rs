// Running-balance schedule over the dataset, one row per period in input order.
use shared::models::ScheduleRow;
use shared::utils::finite_or_zero;

use crate::error::EngineError;
use crate::models::Dataset;

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub rows: Vec<ScheduleRow>,
    /// Sum of every period's available money; equals the last row's balance.
    pub total_available: f64,
}

/// Builds the schedule in a single left-to-right pass. Each row's balance is the
/// sum of available money up to and including that row, so it cannot be split
/// or reordered.
pub fn build_schedule(dataset: &Dataset) -> Result<Schedule, EngineError> {
    dataset.ensure_not_empty()?;

    let (rows, accumulated_balance) = dataset.records().iter().fold(
        (Vec::with_capacity(dataset.len()), 0.0_f64),
        |(mut rows, balance), record| {
            let payment = record.available_money();
            let balance = balance + payment;
            rows.push(ScheduleRow {
                date: record.date.clone(),
                payment,
                remaining_balance: finite_or_zero(balance),
                savings_rate: record.savings_rate(),
            });
            (rows, balance)
        },
    );

    let total_available = finite_or_zero(accumulated_balance);
    tracing::debug!(rows = rows.len(), total_available, "Built schedule");

    Ok(Schedule { rows, total_available })
}
