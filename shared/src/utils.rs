// Numeric helpers shared by the engine and anything rendering its output.

/// Replaces NaN and +/- infinity with `0.0`; every reported figure goes through this.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Rounds to two decimal places, half away from zero.
pub fn round_cents(value: f64) -> f64 {
    finite_or_zero((value * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_or_zero_passes_finite_values() {
        assert_eq!(finite_or_zero(12.5), 12.5);
        assert_eq!(finite_or_zero(-3.0), -3.0);
    }

    #[test]
    fn test_finite_or_zero_replaces_non_finite() {
        assert_eq!(finite_or_zero(f64::NAN), 0.0);
        assert_eq!(finite_or_zero(f64::INFINITY), 0.0);
        assert_eq!(finite_or_zero(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(833.3333), 833.33);
        assert_eq!(round_cents(666.666), 666.67);
        assert_eq!(round_cents(f64::NAN), 0.0);
    }
}
