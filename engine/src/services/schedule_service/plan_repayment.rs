// Handler for the seasonal repayment plan: upload -> dataset -> seasons -> plan.
use chrono::NaiveDate;
use serde::Serialize;
use shared::models::{PlanMetrics, PlannedPayment};

use crate::config::EngineSettings;
use crate::data::{load_table, validate_upload, UploadedFile};
use crate::error::EngineError;
use crate::models::Dataset;
use crate::planner::{detect_seasons, plan_metrics, IncomeProfile, RepaymentPlanner, Seasons};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepaymentPlanResponse {
    pub profile: IncomeProfile,
    pub seasons: Seasons,
    pub schedule: Vec<PlannedPayment>,
    pub metrics: PlanMetrics,
}

pub fn handle_plan_repayment(
    upload: Option<&UploadedFile>,
    settings: &EngineSettings,
    planner: &RepaymentPlanner,
    start: NaiveDate,
) -> Result<RepaymentPlanResponse, EngineError> {
    let file = validate_upload(upload, settings)?;
    let table = load_table(&file.content, &settings.encodings)?;
    let dataset = Dataset::from_table(&table, &settings.required_columns)?;
    plan_for_dataset(&dataset, planner, start)
}

pub fn plan_for_dataset(
    dataset: &Dataset,
    planner: &RepaymentPlanner,
    start: NaiveDate,
) -> Result<RepaymentPlanResponse, EngineError> {
    let profile = IncomeProfile::from_dataset(dataset)?;
    let seasons = detect_seasons(&profile);
    tracing::info!(
        high = ?seasons.high_season_months,
        low = ?seasons.low_season_months,
        "Detected income seasons"
    );

    let schedule = planner.plan(&seasons, start)?;
    let metrics = plan_metrics(&schedule)?;
    Ok(RepaymentPlanResponse {
        profile,
        seasons,
        schedule,
        metrics,
    })
}
