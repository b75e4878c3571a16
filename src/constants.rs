//! Pipeline and service constants
//!
//! ## Volatility window
//!
//! Volatility is the sample standard deviation of the last
//! [`VOLATILITY_WINDOW`] daily returns. Because the first price row has no
//! return, a series needs `VOLATILITY_WINDOW + 1` valid closes before the
//! first volatility value exists.

/// Trailing window (in returns) for rolling volatility
pub const VOLATILITY_WINDOW: usize = 10;

/// Number of standard deviations above the mean used when the caller gives none
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Decimal places kept for volatility values in replies
pub const VOLATILITY_DECIMALS: i32 = 5;

/// Calendar date format accepted on input and emitted on output
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Placeholder returned instead of an empty anomaly list
pub const NO_ANOMALIES_MESSAGE: &str = "No anomalies detected";

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 5000;

/// Yahoo Finance chart API host
pub const DEFAULT_MARKET_DATA_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Upper bound on a single provider request
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
