// Season-aware repayment plan for a fixed amount over a fixed number of months.
use chrono::{Datelike, Duration, NaiveDate};
use shared::models::{PlanMetrics, PlannedPayment, Season};
use shared::utils::round_cents;

use super::seasons::Seasons;
use crate::error::EngineError;
use crate::stats::descriptive;

const HIGH_SEASON_FACTOR: f64 = 1.2;
const LOW_SEASON_FACTOR: f64 = 0.8;
const DAYS_PER_PERIOD: i64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct RepaymentPlanner {
    total_amount: f64,
    term_months: u32,
}

impl RepaymentPlanner {
    pub fn new(total_amount: f64, term_months: u32) -> Result<Self, EngineError> {
        if term_months == 0 {
            return Err(EngineError::InvalidPlan("term must be at least one month".to_string()));
        }
        if !total_amount.is_finite() || total_amount < 0.0 {
            return Err(EngineError::InvalidPlan(format!(
                "total amount must be a non-negative number, got {}",
                total_amount
            )));
        }
        Ok(Self { total_amount, term_months })
    }

    pub fn base_payment(&self) -> f64 {
        self.total_amount / self.term_months as f64
    }

    /// Pays 20% more than the base in high-season months and 20% less in low-season
    /// months, never more than what is left. Stops early once the amount is repaid.
    ///
    /// A month in neither season (no income history for it) is labelled
    /// [`Season::Regular`] rather than `Low`, and pays the base amount.
    pub fn plan(&self, seasons: &Seasons, start: NaiveDate) -> Result<Vec<PlannedPayment>, EngineError> {
        let base = self.base_payment();
        let mut remaining = self.total_amount;
        let mut payments = Vec::new();

        for period in 0..i64::from(self.term_months) {
            let date = start
                .checked_add_signed(Duration::days(DAYS_PER_PERIOD * period))
                .ok_or_else(|| EngineError::InvalidPlan(format!("payment date out of range after {}", start)))?;

            let season = seasons.season_of(date.month());
            let target = match season {
                Season::High => base * HIGH_SEASON_FACTOR,
                Season::Low => base * LOW_SEASON_FACTOR,
                Season::Regular => base,
            };
            let payment = target.min(remaining);
            remaining -= payment;

            payments.push(PlannedPayment {
                date,
                payment: round_cents(payment),
                remaining_balance: round_cents(remaining),
                season,
            });

            if round_cents(remaining) <= 0.0 {
                break;
            }
        }

        tracing::debug!(
            periods = payments.len(),
            left_over = round_cents(remaining),
            "Planned seasonal repayment"
        );
        Ok(payments)
    }
}

pub fn plan_metrics(plan: &[PlannedPayment]) -> Result<PlanMetrics, EngineError> {
    let last = plan
        .last()
        .ok_or_else(|| EngineError::InternalComputationError("repayment plan is empty".to_string()))?;
    let payments: Vec<f64> = plan.iter().map(|p| p.payment).collect();

    Ok(PlanMetrics {
        total_payments: round_cents(payments.iter().sum()),
        average_payment: descriptive::mean(&payments),
        min_payment: payments.iter().copied().fold(f64::INFINITY, f64::min),
        max_payment: payments.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        completion_date: last.date,
        total_months: plan.len(),
    })
}
