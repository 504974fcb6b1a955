// Tolerant coercion of money cells such as "$1,200.50", " 900 ", "" or "n/a".
//
// Unlike a strict decimal parser this never fails: anything that does not survive
// cleanup as a finite number becomes 0.0.
use shared::utils::finite_or_zero;

/// Keeps ASCII digits, '.', and a minus sign when it is the first retained character,
/// then parses what is left. Unparseable or non-finite results become `0.0`.
pub fn normalize_amount(raw: &str) -> f64 {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_digit() || c == '.' || (c == '-' && cleaned.is_empty()) {
            cleaned.push(c);
        }
    }

    match cleaned.parse::<f64>() {
        Ok(value) => finite_or_zero(value),
        Err(_) => 0.0,
    }
}

/// Cells that are already numeric only need the NaN/infinity guard.
pub fn normalize_number(value: f64) -> f64 {
    finite_or_zero(value)
}
