//! Return and volatility calculations for daily close series
//!
//! # Conventions
//! - Inputs are closes in chronological order, already cleaned of missing or
//!   non-positive values.
//! - Outputs are aligned index-for-index with the input; `None` marks a
//!   position where the value is undefined (warm-up rows).
//! - Standard deviations use the **sample** estimator (n - 1 denominator).

/// Calculate simple daily returns: `close[i] / close[i-1] - 1`
///
/// # Arguments
/// * `closes` - Slice of closing prices in chronological order
///
/// # Returns
/// * Vector the same length as `closes`; the first element is always `None`
pub fn calculate_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut returns = vec![None; closes.len()];

    for i in 1..closes.len() {
        returns[i] = Some(closes[i] / closes[i - 1] - 1.0);
    }

    returns
}

/// Calculate rolling sample standard deviation over a trailing window
///
/// A position is defined only when all `window` values ending at it
/// (inclusive) are defined. Windows smaller than 2 never produce a value,
/// since the sample estimator needs at least two observations.
///
/// # Arguments
/// * `values` - Series with possibly undefined entries
/// * `window` - Number of trailing values per estimate (e.g., 10)
///
/// # Returns
/// * Vector of standard deviations aligned with `values`
pub fn calculate_rolling_std(values: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let mut std_values = vec![None; values.len()];

    if window < 2 || values.len() < window {
        return std_values;
    }

    for i in (window - 1)..values.len() {
        let start_idx = i + 1 - window;
        let slice: Option<Vec<f64>> = values[start_idx..=i].iter().copied().collect();
        if let Some(slice) = slice {
            std_values[i] = sample_std(&slice);
        }
    }

    std_values
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator)
///
/// # Returns
/// * `None` when fewer than two values are given
///
/// # Example
/// ```
/// // values = [2, 4, 4, 4, 5, 5, 7, 9], mean = 5
/// // sum of squared deviations = 32, variance = 32 / 7
/// // std = sqrt(32 / 7) ≈ 2.138
/// ```
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let avg = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - avg).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}
