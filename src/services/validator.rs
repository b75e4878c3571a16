//! Input validation for volatility requests
//!
//! Everything the pipeline consumes passes through here first, so later stages
//! only ever see a [`RequestParams`] value.

use crate::constants::{DATE_FORMAT, DEFAULT_THRESHOLD};
use crate::error::{AppError, Result};
use crate::models::{RequestParams, VolatilityQuery};
use chrono::NaiveDate;

/// Validate a ticker symbol and return it uppercased
///
/// Accepts only non-empty ASCII alphabetic strings ("aapl" → "AAPL").
pub fn validate_symbol(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Err(AppError::InvalidInput("symbol must not be empty".to_string()));
    }
    if !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::InvalidInput(format!(
            "symbol '{}' must contain letters only",
            raw
        )));
    }
    Ok(raw.to_ascii_uppercase())
}

/// Parse a strict ISO calendar date (YYYY-MM-DD)
pub fn validate_date(raw: &str) -> Result<NaiveDate> {
    // chrono accepts unpadded fields and signed years, so pin the shape first
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(AppError::InvalidInput(format!(
            "date '{}' is not in YYYY-MM-DD format",
            raw
        )));
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| {
        AppError::InvalidInput(format!("date '{}' is not a valid calendar date", raw))
    })
}

/// Require `start` strictly before `end`
pub fn validate_range(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if start < end {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "start date {} must be before end date {}",
            start, end
        )))
    }
}

/// Parse the anomaly threshold, defaulting to 2.0 when absent
pub fn validate_threshold(raw: Option<&str>) -> Result<f64> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(DEFAULT_THRESHOLD),
        Some(raw) => raw,
    };

    let threshold: f64 = raw.parse().map_err(|_| {
        AppError::InvalidInput(format!("threshold '{}' is not a number", raw))
    })?;

    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(AppError::InvalidInput(format!(
            "threshold must be a positive finite number, got '{}'",
            raw
        )));
    }

    Ok(threshold)
}

/// Validate a raw query into [`RequestParams`]
///
/// Presence of symbol, start and end is checked before anything else and all
/// missing names are reported together. Empty values count as missing.
pub fn validate_request(query: &VolatilityQuery) -> Result<RequestParams> {
    fn present(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.is_empty())
    }

    let symbol = present(&query.symbol);
    let start = present(&query.start);
    let end = present(&query.end);

    let missing: Vec<String> = [("symbol", symbol), ("start", start), ("end", end)]
        .iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name.to_string())
        .collect();

    let (Some(symbol), Some(start), Some(end)) = (symbol, start, end) else {
        return Err(AppError::MissingParameters(missing));
    };

    let symbol = validate_symbol(symbol)?;
    let start = validate_date(start)?;
    let end = validate_date(end)?;
    validate_range(start, end)?;
    let threshold = validate_threshold(query.threshold.as_deref())?;

    Ok(RequestParams::new(symbol, start, end, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn query(symbol: Option<&str>, start: Option<&str>, end: Option<&str>, threshold: Option<&str>) -> VolatilityQuery {
        VolatilityQuery {
            symbol: symbol.map(String::from),
            start: start.map(String::from),
            end: end.map(String::from),
            threshold: threshold.map(String::from),
        }
    }

    #[test]
    fn test_validate_symbol() {
        assert_eq!(validate_symbol("aapl").unwrap(), "AAPL");
        assert_eq!(validate_symbol("Msft").unwrap(), "MSFT");
        assert!(matches!(validate_symbol("AAPL1"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_symbol(""), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_symbol("BRK.B"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_symbol(" AAPL"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_date() {
        assert_eq!(
            validate_date("2023-01-01").unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert!(matches!(validate_date("2023/01/01"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_date("2023-1-1"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_date("2023-02-30"), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_date("yesterday"), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_range() {
        let jan = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let jun = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();

        assert!(validate_range(jan, jun).is_ok());
        assert!(matches!(validate_range(jun, jan), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_range(jan, jan), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_threshold() {
        assert_eq!(validate_threshold(None).unwrap(), 2.0);
        assert_eq!(validate_threshold(Some("")).unwrap(), 2.0);
        assert_eq!(validate_threshold(Some("1.5")).unwrap(), 1.5);
        assert_eq!(validate_threshold(Some("3")).unwrap(), 3.0);
        assert!(matches!(validate_threshold(Some("abc")), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_threshold(Some("-1")), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_threshold(Some("0")), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_threshold(Some("NaN")), Err(AppError::InvalidInput(_))));
        assert!(matches!(validate_threshold(Some("inf")), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_validate_request_ok() {
        let params = validate_request(&query(Some("aapl"), Some("2023-01-01"), Some("2023-12-31"), None)).unwrap();

        assert_eq!(params.symbol(), "AAPL");
        assert_eq!(params.threshold(), 2.0);
        assert_eq!(params.period(), "2023-01-01 to 2023-12-31");
    }

    #[test]
    fn test_validate_request_inverted_range() {
        let err = validate_request(&query(Some("AAPL"), Some("2023-06-01"), Some("2023-01-01"), None)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_validate_request_missing() {
        let err = validate_request(&query(None, Some("2023-01-01"), Some(""), Some("abc"))).unwrap_err();

        match err {
            AppError::MissingParameters(names) => assert_eq!(names, vec!["symbol", "end"]),
            other => panic!("expected MissingParameters, got {:?}", other),
        }
    }
}
