//! Small numeric helpers used by the indicator and level calculators.

/// Round to two decimal places (monetary precision).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// True range of a bar relative to the previous close.
pub fn true_range(high: f64, low: f64, prev_close: f64) -> f64 {
    (high - low)
        .max((high - prev_close).abs())
        .max((low - prev_close).abs())
}

/// Arithmetic mean of the most recent `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let window = &values[values.len() - period..];
    Some(window.iter().sum::<f64>() / period as f64)
}

/// Signed percentage distance of `value` from `reference`.
pub fn pct_distance(value: f64, reference: f64) -> Option<f64> {
    if reference == 0.0 || !reference.is_finite() {
        return None;
    }
    Some((value - reference) / reference * 100.0)
}

/// Treat non-finite readings as absent.
pub fn known(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
