// Result assembly: merges schedule rows and metrics into the response body.
use shared::models::{Metrics, ScheduleResponse};

use crate::schedule::Schedule;

/// Moves both parts into the response unchanged.
pub fn assemble(schedule: Schedule, metrics: Metrics) -> ScheduleResponse {
    if (schedule.total_available - metrics.total_amount).abs() > 1e-6 {
        tracing::warn!(
            schedule_total = schedule.total_available,
            metrics_total = metrics.total_amount,
            "Schedule total and metrics total disagree"
        );
    }
    ScheduleResponse {
        metrics,
        data: schedule.rows,
    }
}
