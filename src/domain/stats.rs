//! Numeric helpers shared by the category scorers.
//!
//! Every helper returns 0 instead of NaN or infinity when its denominator is
//! zero.

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `count / total` as a percentage rounded to two decimals, 0 when `total` is 0.
pub fn safe_percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(count as f64 / total as f64 * 100.0)
}

/// Linear interpolation between `min` and `max`. `t` is not clamped.
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    min + (max - min) * t
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn standard_deviation(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|v| {
            let diff = v - avg;
            diff * diff
        })
        .sum::<f64>()
        / values.len() as f64;
    variance.sqrt()
}

/// Standard deviation as a percentage of the absolute mean, 0 when the mean is 0.
pub fn relative_deviation_pct(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg == 0.0 {
        return 0.0;
    }
    standard_deviation(values) / avg.abs() * 100.0
}
