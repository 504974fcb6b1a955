// Engine-side representation of the uploaded time series.
use shared::utils::finite_or_zero;

use crate::config::RequiredColumns;
use crate::data::csv_loader::Table;
use crate::data::normalizer::normalize_number;
use crate::error::EngineError;

/// One input period, with income and expenses already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodRecord {
    pub period_label: String,
    pub date: String,
    pub total_income: f64,
    pub fixed_expenses: f64,
}

impl PeriodRecord {
    pub fn new(period_label: impl Into<String>, date: impl Into<String>, total_income: f64, fixed_expenses: f64) -> Self {
        Self {
            period_label: period_label.into(),
            date: date.into(),
            total_income: normalize_number(total_income),
            fixed_expenses: normalize_number(fixed_expenses),
        }
    }

    /// Income minus fixed expenses; negative when the period ran a deficit.
    pub fn available_money(&self) -> f64 {
        finite_or_zero(self.total_income - self.fixed_expenses)
    }

    /// Available money as a percentage of income, `0.0` when income is zero.
    /// Not clamped: deficits give negative rates.
    pub fn savings_rate(&self) -> f64 {
        if self.total_income == 0.0 {
            return 0.0;
        }
        finite_or_zero(self.available_money() / self.total_income * 100.0)
    }
}

/// Chronologically ordered periods. Order is never changed after loading.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<PeriodRecord>,
}

impl Dataset {
    pub fn new(records: Vec<PeriodRecord>) -> Self {
        Self { records }
    }

    /// Validates the required headers, then normalizes every income/expense cell.
    pub fn from_table(table: &Table, columns: &RequiredColumns) -> Result<Self, EngineError> {
        table.require_columns(columns)?;

        let labels = table.text_column(&columns.label)?;
        let dates = table.text_column(&columns.date)?;
        let incomes = table.numeric_column(&columns.income)?;
        let expenses = table.numeric_column(&columns.expenses)?;

        let records = labels
            .into_iter()
            .zip(dates)
            .zip(incomes.into_iter().zip(expenses))
            .map(|((label, date), (income, expense))| PeriodRecord::new(label, date, income, expense))
            .collect();
        Ok(Self { records })
    }

    pub fn records(&self) -> &[PeriodRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn incomes(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.total_income).collect()
    }

    pub fn expenses(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.fixed_expenses).collect()
    }

    pub fn available(&self) -> Vec<f64> {
        self.records.iter().map(PeriodRecord::available_money).collect()
    }

    pub fn savings_rates(&self) -> Vec<f64> {
        self.records.iter().map(PeriodRecord::savings_rate).collect()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.period_label.as_str()).collect()
    }

    /// Schedule and statistics are undefined without at least one period.
    pub fn ensure_not_empty(&self) -> Result<(), EngineError> {
        if self.records.is_empty() {
            return Err(EngineError::InternalComputationError("dataset contains no rows".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_fields() {
        let record = PeriodRecord::new("Jan", "2024-01-01", 1000.0, 600.0);
        assert_eq!(record.available_money(), 400.0);
        assert_eq!(record.savings_rate(), 40.0);
    }

    #[test]
    fn test_zero_income_savings_rate_is_zero() {
        let record = PeriodRecord::new("Jan", "2024-01-01", 0.0, 250.0);
        assert_eq!(record.available_money(), -250.0);
        assert_eq!(record.savings_rate(), 0.0);
    }

    #[test]
    fn test_savings_rate_is_unbounded() {
        let deficit = PeriodRecord::new("Feb", "2024-02-01", 500.0, 1000.0);
        assert_eq!(deficit.savings_rate(), -100.0);
        let negative_income = PeriodRecord::new("Mar", "2024-03-01", -100.0, 100.0);
        assert_eq!(negative_income.savings_rate(), 200.0);
    }

    #[test]
    fn test_from_table_normalizes_cells_in_order() {
        let table = Table::new(
            ["Date", "Month", "Fixed Expenses", "Total Income", "Notes"],
            vec![
                vec!["2024-01-01", "Jan", "$600", "1,000", "x"],
                vec!["2024-02-01", "Feb", "", "n/a", "y"],
            ],
        );
        let dataset = Dataset::from_table(&table, &RequiredColumns::default()).unwrap();
        assert_eq!(
            dataset.records(),
            &[
                PeriodRecord::new("Jan", "2024-01-01", 1000.0, 600.0),
                PeriodRecord::new("Feb", "2024-02-01", 0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_from_table_reports_missing_columns() {
        let table = Table::new(["Month", "Date", "Total Income"], vec![vec!["Jan", "2024-01-01", "1000"]]);
        let err = Dataset::from_table(&table, &RequiredColumns::default()).unwrap_err();
        match err {
            EngineError::MissingColumns(cols) => assert_eq!(cols, vec!["Fixed Expenses".to_string()]),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(
            Dataset::default().ensure_not_empty(),
            Err(EngineError::InternalComputationError(_))
        ));
        assert!(Dataset::new(vec![PeriodRecord::new("Jan", "", 1.0, 0.0)]).ensure_not_empty().is_ok());
    }
}
