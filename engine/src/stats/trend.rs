// Period-over-period trend rates.
use shared::utils::finite_or_zero;

/// Mean of the period-over-period percent changes of `series`.
///
/// A 0 -> 0 step has no defined change and is left out of the mean. A step from zero to
/// anything else is infinite and makes the whole trend `0.0`, as do fewer than two points.
pub fn trend_rate(series: &[f64]) -> f64 {
    let (sum, steps) = series
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) / pair[0] * 100.0)
        .filter(|change| !change.is_nan())
        .fold((0.0, 0usize), |(sum, steps), change| (sum + change, steps + 1));
    if steps == 0 {
        return 0.0;
    }
    finite_or_zero(sum / steps as f64)
}

/// Share of total income left over after fixed expenses, in percent.
pub fn aggregate_savings_rate(available: &[f64], income: &[f64]) -> f64 {
    let total_income: f64 = income.iter().sum();
    if total_income == 0.0 {
        return 0.0;
    }
    let total_available: f64 = available.iter().sum();
    finite_or_zero(total_available / total_income * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_series_has_zero_trend() {
        assert_eq!(trend_rate(&[1000.0, 1000.0, 1000.0, 1000.0]), 0.0);
    }

    #[test]
    fn test_mean_of_percent_changes() {
        // +20% then -25%
        let rate = trend_rate(&[1000.0, 1200.0, 900.0]);
        assert!((rate - (-2.5)).abs() < 1e-9, "got {}", rate);
    }

    #[test]
    fn test_short_series() {
        assert_eq!(trend_rate(&[]), 0.0);
        assert_eq!(trend_rate(&[500.0]), 0.0);
    }

    #[test]
    fn test_step_from_zero_is_guarded() {
        assert_eq!(trend_rate(&[0.0, 100.0, 200.0]), 0.0);
        assert_eq!(trend_rate(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_zero_to_zero_step_is_skipped() {
        // +20%, -100%, then an undefined 0 -> 0 step
        let rate = trend_rate(&[500.0, 600.0, 0.0, 0.0]);
        assert!((rate - (-40.0)).abs() < 1e-9, "got {}", rate);
    }

    #[test]
    fn test_aggregate_savings_rate() {
        let rate = aggregate_savings_rate(&[400.0, 600.0, 300.0], &[1000.0, 1200.0, 900.0]);
        assert!((rate - 1300.0 / 3100.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_savings_rate_zero_income() {
        assert_eq!(aggregate_savings_rate(&[-100.0, 0.0], &[0.0, 0.0]), 0.0);
    }
}
