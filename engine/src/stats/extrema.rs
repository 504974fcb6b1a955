// Best/worst period lookups. Ties go to the earliest period.

pub fn first_max_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (idx, &value)| match best {
            Some((_, current)) if value <= current => best,
            _ => Some((idx, value)),
        })
        .map(|(idx, _)| idx)
}

pub fn first_min_index(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |worst: Option<(usize, f64)>, (idx, &value)| match worst {
            Some((_, current)) if value >= current => worst,
            _ => Some((idx, value)),
        })
        .map(|(idx, _)| idx)
}

/// Labels of the periods with the most and the least available money.
pub fn best_and_worst(labels: &[&str], available: &[f64]) -> Option<(String, String)> {
    let best = labels.get(first_max_index(available)?)?;
    let worst = labels.get(first_min_index(available)?)?;
    Some((best.to_string(), worst.to_string()))
}
