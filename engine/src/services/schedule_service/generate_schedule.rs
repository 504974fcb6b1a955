// Handler for the schedule request: upload -> table -> dataset -> schedule + metrics.
use shared::models::ScheduleResponse;

use super::assemble::assemble;
use crate::config::EngineSettings;
use crate::data::{load_table, validate_upload, Table, UploadedFile};
use crate::error::EngineError;
use crate::models::Dataset;
use crate::schedule::build_schedule;
use crate::stats::compute_metrics;

pub fn handle_generate_schedule(
    upload: Option<&UploadedFile>,
    settings: &EngineSettings,
) -> Result<ScheduleResponse, EngineError> {
    let file = validate_upload(upload, settings)?;
    tracing::info!(filename = %file.filename, bytes = file.content.len(), "Received file");

    let table = load_table(&file.content, &settings.encodings)?;
    handle_table(&table, settings)
}

pub fn handle_table(table: &Table, settings: &EngineSettings) -> Result<ScheduleResponse, EngineError> {
    let dataset = Dataset::from_table(table, &settings.required_columns)?;
    tracing::info!(rows = dataset.len(), "Column validation passed");
    handle_dataset(&dataset)
}

pub fn handle_dataset(dataset: &Dataset) -> Result<ScheduleResponse, EngineError> {
    let schedule = build_schedule(dataset)?;
    let metrics = compute_metrics(dataset)?;
    tracing::info!(
        total_amount = metrics.total_amount,
        total_months = metrics.total_months,
        completion_date = %metrics.completion_date,
        "Successfully generated schedule"
    );
    Ok(assemble(schedule, metrics))
}
