use crate::constants::{
    DATE_FORMAT, DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MARKET_DATA_BASE_URL, DEFAULT_PORT,
};
use chrono::NaiveDate;
use std::str::FromStr;

/// Get HTTP port from environment variable or use default
pub fn get_port() -> u16 {
    parse_env_value("PORT", std::env::var("PORT").ok(), DEFAULT_PORT)
}

/// Get market data provider base URL from environment variable or use default
pub fn get_market_data_base_url() -> String {
    std::env::var("MARKET_DATA_BASE_URL")
        .ok()
        .map(|url| url.trim().trim_end_matches('/').to_string())
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| DEFAULT_MARKET_DATA_BASE_URL.to_string())
}

/// Get provider request timeout (seconds) from environment variable or use default
pub fn get_fetch_timeout_secs() -> u64 {
    let secs = parse_env_value(
        "FETCH_TIMEOUT_SECS",
        std::env::var("FETCH_TIMEOUT_SECS").ok(),
        DEFAULT_FETCH_TIMEOUT_SECS,
    );
    if secs == 0 {
        tracing::warn!("FETCH_TIMEOUT_SECS must be positive, using {}", DEFAULT_FETCH_TIMEOUT_SECS);
        DEFAULT_FETCH_TIMEOUT_SECS
    } else {
        secs
    }
}

/// Whether to prefer split/dividend adjusted closes (default: true)
pub fn get_use_adjusted_close() -> bool {
    parse_env_value("USE_ADJUSTED_CLOSE", std::env::var("USE_ADJUSTED_CLOSE").ok(), true)
}

/// Allowed CORS origins (comma-separated); empty means any origin
pub fn get_cors_origins() -> Vec<String> {
    std::env::var("CORS_ORIGINS")
        .map(|origins| {
            origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Parse an optional raw environment value, falling back to `default` when unset or invalid
pub fn parse_env_value<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match raw {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!("Invalid value '{}' for {}, using default {}", value, key, default);
                default
            }
        },
        None => default,
    }
}

/// Format a calendar date as YYYY-MM-DD
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Round to `decimals` places
///
/// Ties round away from zero (`f64::round`), not half-to-even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
