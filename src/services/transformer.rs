use crate::constants::VOLATILITY_WINDOW;
use crate::models::indicators::{calculate_returns, calculate_rolling_std};
use crate::models::{PriceSeries, ReturnVolatilitySeries, VolatilityPoint};
use chrono::NaiveDate;
use tracing::debug;

/// Derive daily returns and 10-day rolling volatility from a price series
pub fn transform(series: &PriceSeries) -> ReturnVolatilitySeries {
    transform_with_window(series, VOLATILITY_WINDOW)
}

/// Same as [`transform`] with an explicit window
///
/// Rows whose close is missing, non-finite or non-positive are dropped before
/// returns are taken, so a return always spans two consecutive valid closes.
/// Rows without a defined return and volatility are left out of the result;
/// fewer than `window + 1` valid closes gives an empty series.
pub fn transform_with_window(series: &PriceSeries, window: usize) -> ReturnVolatilitySeries {
    let valid: Vec<(NaiveDate, f64)> = series
        .rows()
        .iter()
        .filter_map(|row| match row.close {
            Some(close) if close.is_finite() && close > 0.0 => Some((row.date, close)),
            _ => None,
        })
        .collect();

    let dropped = series.len() - valid.len();
    if dropped > 0 {
        debug!(dropped, "Dropped rows with unusable closes");
    }

    let closes: Vec<f64> = valid.iter().map(|(_, close)| *close).collect();
    let returns = calculate_returns(&closes);
    let volatilities = calculate_rolling_std(&returns, window);

    let points: Vec<VolatilityPoint> = valid
        .iter()
        .zip(returns.iter().zip(volatilities.iter()))
        .filter_map(|((date, _), (ret, vol))| match (ret, vol) {
            (Some(daily_return), Some(volatility)) => Some(VolatilityPoint {
                date: *date,
                daily_return: *daily_return,
                volatility: *volatility,
            }),
            _ => None,
        })
        .collect();

    debug!(valid_rows = valid.len(), points = points.len(), window, "Derived volatility series");

    ReturnVolatilitySeries::new(points)
}
