// Descriptive statistics for a single series.
use shared::models::SeriesStats;
use shared::utils::finite_or_zero;

pub fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    finite_or_zero(series.iter().sum::<f64>() / series.len() as f64)
}

pub fn median(series: &[f64]) -> f64 {
    if series.is_empty() {
        return 0.0;
    }
    let mut sorted = series.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    let value = if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    };
    finite_or_zero(value)
}

/// Sample standard deviation (n - 1 denominator); `0.0` below two points.
pub fn sample_std(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let m = mean(series);
    let sum_sq: f64 = series.iter().map(|x| (x - m).powi(2)).sum();
    finite_or_zero((sum_sq / (series.len() - 1) as f64).sqrt())
}

/// Percent change from the first to the last value; `0.0` when the first value is zero.
pub fn growth(series: &[f64]) -> f64 {
    match (series.first(), series.last()) {
        (Some(&first), Some(&last)) if first != 0.0 => finite_or_zero((last / first - 1.0) * 100.0),
        _ => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesSummary {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub growth: f64,
}

impl SeriesSummary {
    pub fn from_series(series: &[f64]) -> Self {
        Self {
            mean: mean(series),
            median: median(series),
            std: sample_std(series),
            growth: growth(series),
        }
    }
}

impl From<SeriesSummary> for SeriesStats {
    fn from(summary: SeriesSummary) -> Self {
        SeriesStats {
            mean: summary.mean,
            median: summary.median,
            std: summary.std,
            growth: summary.growth,
        }
    }
}
