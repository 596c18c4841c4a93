/// Rounds to two decimal places, halves away from zero.
///
/// The value is scaled by 100 before rounding, so `59.995` (which scales to
/// exactly `5999.5`) rounds up to `60.0`.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
