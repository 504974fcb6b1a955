// engine/src/services/schedule_service/mod.rs
// Entry point callers use; each request is handled by a sibling module.
//
// The service only holds read-only settings, so one instance can serve any
// number of requests; every call builds its own dataset and buffers.

use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{ErrorResponse, ScheduleResponse};

use crate::config::EngineSettings;
use crate::data::{Table, UploadedFile};
use crate::error::EngineError;
use crate::planner::RepaymentPlanner;

pub mod assemble;
pub mod generate_schedule;
pub mod plan_repayment;

pub use plan_repayment::RepaymentPlanResponse;

#[derive(Debug, Clone, Default)]
pub struct ScheduleService {
    settings: EngineSettings,
}

impl ScheduleService {
    pub fn new(settings: EngineSettings) -> Self {
        ScheduleService { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn generate_schedule(&self, upload: Option<&UploadedFile>) -> Result<ScheduleResponse, EngineError> {
        tracing::info!(
            filename = upload.map(|f| f.filename.as_str()).unwrap_or("<none>"),
            "Received request to generate schedule"
        );
        generate_schedule::handle_generate_schedule(upload, &self.settings)
    }

    /// For callers that already parsed the CSV themselves.
    pub fn generate_schedule_from_table(&self, table: &Table) -> Result<ScheduleResponse, EngineError> {
        generate_schedule::handle_table(table, &self.settings)
    }

    pub fn plan_repayment(
        &self,
        upload: Option<&UploadedFile>,
        total_amount: f64,
        term_months: u32,
        start: NaiveDate,
    ) -> Result<RepaymentPlanResponse, EngineError> {
        tracing::info!(total_amount, term_months, %start, "Received request to plan repayment");
        let planner = RepaymentPlanner::new(total_amount, term_months)?;
        plan_repayment::handle_plan_repayment(upload, &self.settings, &planner, start)
    }
}

/// Status code and JSON body for a handler result, as a transport layer would send them.
pub fn into_http_parts<T: Serialize>(result: &Result<T, EngineError>) -> (u16, serde_json::Value) {
    match result {
        Ok(body) => match serde_json::to_value(body) {
            Ok(value) => (200, value),
            Err(e) => {
                let err = EngineError::InternalComputationError(format!("failed to serialize response: {}", e));
                error_parts(&err)
            }
        },
        Err(err) => error_parts(err),
    }
}

fn error_parts(err: &EngineError) -> (u16, serde_json::Value) {
    let body = ErrorResponse::from(err);
    let value = serde_json::to_value(&body).unwrap_or_else(|_| serde_json::json!({ "error": body.error }));
    (err.classification().status_code(), value)
}
