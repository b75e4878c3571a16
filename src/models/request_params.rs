use crate::utils::format_date;
use chrono::NaiveDate;
use serde::Deserialize;

/// Raw query parameters for /volatility, exactly as received
///
/// Every field is optional text so that parsing and presence checks all happen
/// in the validator, which reports them with the same error shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VolatilityQuery {
    /// Ticker symbol (alphabetic, case-insensitive)
    pub symbol: Option<String>,

    /// Start date, inclusive (YYYY-MM-DD)
    pub start: Option<String>,

    /// End date, exclusive (YYYY-MM-DD)
    pub end: Option<String>,

    /// Standard deviations above the mean volatility (default: 2.0)
    pub threshold: Option<String>,
}

/// Validated request: uppercase symbol, ordered dates, positive finite threshold
///
/// Fields are private; values come from `services::validator::validate_request`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    symbol: String,
    start: NaiveDate,
    end: NaiveDate,
    threshold: f64,
}

impl RequestParams {
    pub(crate) fn new(symbol: String, start: NaiveDate, end: NaiveDate, threshold: f64) -> Self {
        Self {
            symbol,
            start,
            end,
            threshold,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Human-readable period, e.g. "2023-01-01 to 2023-12-31"
    pub fn period(&self) -> String {
        format!("{} to {}", format_date(&self.start), format_date(&self.end))
    }
}
