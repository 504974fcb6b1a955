//! Seasonal income profile.
//!
//! Each period is mapped to a calendar month (from its date, or from a month
//! name in its label), income is averaged per calendar month, and months whose
//! average beats the mean of all monthly averages are treated as high season.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use shared::models::Season;
use shared::utils::finite_or_zero;

use crate::error::EngineError;
use crate::models::{Dataset, PeriodRecord};
use crate::stats::descriptive;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];

const MONTH_NAMES: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Parses a full date, or a `YYYY-MM` month, into its calendar month (1-12).
pub fn month_from_date(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| NaiveDate::parse_from_str(&format!("{}-01", raw), "%Y-%m-%d").ok())
        .map(|date| date.month())
}

/// Accepts "March", "mar", "Sept" or "March 2024"; the first word decides.
pub fn month_from_name(raw: &str) -> Option<u32> {
    let word = raw.split_whitespace().next()?.trim_end_matches('.').to_lowercase();
    if word.len() < 3 {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(&word))
        .map(|idx| idx as u32 + 1)
}

pub fn resolve_month(record: &PeriodRecord) -> Option<u32> {
    month_from_date(&record.date).or_else(|| month_from_name(&record.period_label))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IncomeProfile {
    pub total_months: usize,
    pub average_income: f64,
    pub min_income: f64,
    pub max_income: f64,
    pub std_income: f64,
    /// Mean income per calendar month (1 = January).
    pub monthly_averages: BTreeMap<u32, f64>,
    /// Periods whose calendar month could not be determined.
    pub unresolved_rows: usize,
}

impl IncomeProfile {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self, EngineError> {
        dataset.ensure_not_empty()?;

        let incomes = dataset.incomes();
        let mut buckets: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
        let mut unresolved_rows = 0;
        for record in dataset.records() {
            match resolve_month(record) {
                Some(month) => buckets.entry(month).or_default().push(record.total_income),
                None => unresolved_rows += 1,
            }
        }
        if unresolved_rows > 0 {
            tracing::warn!(unresolved_rows, "Some periods have no recognizable month");
        }

        let monthly_averages = buckets
            .into_iter()
            .map(|(month, values)| (month, descriptive::mean(&values)))
            .collect();

        Ok(Self {
            total_months: dataset.len(),
            average_income: descriptive::mean(&incomes),
            min_income: finite_or_zero(incomes.iter().copied().fold(f64::INFINITY, f64::min)),
            max_income: finite_or_zero(incomes.iter().copied().fold(f64::NEG_INFINITY, f64::max)),
            std_income: descriptive::sample_std(&incomes),
            monthly_averages,
            unresolved_rows,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Seasons {
    pub high_season_months: Vec<u32>,
    pub low_season_months: Vec<u32>,
    pub monthly_averages: BTreeMap<u32, f64>,
}

impl Seasons {
    pub fn season_of(&self, month: u32) -> Season {
        if self.high_season_months.contains(&month) {
            Season::High
        } else if self.low_season_months.contains(&month) {
            Season::Low
        } else {
            Season::Regular
        }
    }
}

pub fn detect_seasons(profile: &IncomeProfile) -> Seasons {
    let averages: Vec<f64> = profile.monthly_averages.values().copied().collect();
    let overall = descriptive::mean(&averages);

    let (high, low): (Vec<_>, Vec<_>) = profile
        .monthly_averages
        .iter()
        .partition(|&(_, &avg)| avg > overall);

    Seasons {
        high_season_months: high.into_iter().map(|(&month, _)| month).collect(),
        low_season_months: low.into_iter().map(|(&month, _)| month).collect(),
        monthly_averages: profile.monthly_averages.clone(),
    }
}
