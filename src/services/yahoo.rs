//! Yahoo Finance chart API client
//!
//! Fetches daily closes from the public chart endpoint
//! (`/v8/finance/chart/{symbol}`).
//!
//! Behaviour:
//! - One request per fetch, bounded by the client timeout; no retries
//! - `period1`/`period2` are UTC midnights, so the end date is exclusive
//! - Bar timestamps are shifted by the exchange `gmtoffset` before taking the
//!   calendar date
//! - Adjusted closes are used when enabled and present in the response
//!
//! # Example
//!
//! ```rust,ignore
//! use volwatch::services::{PriceProvider, YahooClient};
//!
//! let client = YahooClient::new("https://query1.finance.yahoo.com".into(), Duration::from_secs(30))?;
//! let rows = client.daily_closes("AAPL", start, end).await?;
//! ```

use crate::error::{AppError, Result};
use crate::models::PricePoint;
use crate::services::PriceProvider;
use chrono::{DateTime, NaiveDate};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration as StdDuration;
use tracing::{debug, info, instrument, warn};

/// Browser-like agent; the chart endpoint rejects requests without one
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Chart API envelope
#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
    #[serde(rename = "exchangeName")]
    #[serde(default)]
    exchange_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteBlock>,
    #[serde(default)]
    adjclose: Option<Vec<AdjCloseBlock>>,
}

#[derive(Debug, Deserialize)]
struct QuoteBlock {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseBlock {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance chart client
#[derive(Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
    use_adjusted_close: bool,
}

impl YahooClient {
    /// Create a new client
    ///
    /// # Arguments
    ///
    /// * `base_url` - API host, e.g. "https://query1.finance.yahoo.com"
    /// * `timeout` - Upper bound for each request
    pub fn new(base_url: String, timeout: StdDuration) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Invalid market data base URL: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(base_url = %base_url, timeout_secs = timeout.as_secs(), "Created YahooClient");

        Ok(Self {
            client,
            base_url,
            use_adjusted_close: true,
        })
    }

    /// Choose between adjusted and raw closes
    pub fn with_adjusted_close(mut self, enabled: bool) -> Self {
        self.use_adjusted_close = enabled;
        self
    }

    fn chart_url(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
        let period1 = start.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        let period2 = end.and_hms_opt(0, 0, 0).map_or(0, |dt| dt.and_utc().timestamp());
        format!(
            "{}/v8/finance/chart/{}?period1={}&period2={}&interval=1d&events=history&includeAdjustedClose=true",
            self.base_url, symbol, period1, period2
        )
    }

    /// Single GET with status mapping; no retries
    async fn make_request(&self, url: &str) -> Result<ChartEnvelope> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Chart request failed: {}", e);
            AppError::from(e)
        })?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            // Unknown or delisted symbol; body usually carries a chart error
            let description = response
                .json::<ChartEnvelope>()
                .await
                .ok()
                .and_then(|env| env.chart.error)
                .map(|err| err.description)
                .unwrap_or_else(|| "symbol not found".to_string());
            return Err(AppError::NoDataAvailable(description));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let preview: String = body.chars().take(200).collect();
            return Err(AppError::Upstream(format!(
                "provider returned HTTP {}: {}",
                status.as_u16(),
                preview
            )));
        }

        Ok(response.json::<ChartEnvelope>().await?)
    }
}

impl PriceProvider for YahooClient {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    #[instrument(skip(self), fields(provider = "yahoo"))]
    async fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PricePoint>> {
        let url = self.chart_url(symbol, start, end);
        debug!("Requesting chart: {}", url);

        let envelope = self.make_request(&url).await?;
        parse_chart(envelope, self.use_adjusted_close)
    }
}

/// Turn a decoded chart response into price rows
fn parse_chart(envelope: ChartEnvelope, use_adjusted_close: bool) -> Result<Vec<PricePoint>> {
    if let Some(error) = envelope.chart.error {
        return if error.code == "Not Found" {
            Err(AppError::NoDataAvailable(error.description))
        } else {
            Err(AppError::Upstream(format!("{}: {}", error.code, error.description)))
        };
    }

    let Some(result) = envelope.chart.result.and_then(|results| results.into_iter().next()) else {
        return Ok(Vec::new());
    };

    let timestamps = result.timestamp.unwrap_or_default();
    let adjusted = if use_adjusted_close {
        result
            .indicators
            .adjclose
            .and_then(|blocks| blocks.into_iter().next())
            .map(|block| block.adjclose)
            .filter(|values| values.len() == timestamps.len())
    } else {
        None
    };
    let closes = match adjusted {
        Some(values) => values,
        None => result
            .indicators
            .quote
            .into_iter()
            .next()
            .map(|block| block.close)
            .unwrap_or_default(),
    };

    if closes.len() != timestamps.len() {
        return Err(AppError::Upstream(format!(
            "provider returned {} timestamps but {} closes",
            timestamps.len(),
            closes.len()
        )));
    }

    let gmtoffset = result.meta.gmtoffset;
    let mut rows = Vec::with_capacity(timestamps.len());
    for (ts, close) in timestamps.into_iter().zip(closes) {
        match DateTime::from_timestamp(ts + gmtoffset, 0) {
            Some(local) => rows.push(PricePoint {
                date: local.date_naive(),
                close,
            }),
            None => warn!(ts, "Skipping bar with out-of-range timestamp"),
        }
    }

    debug!(
        rows = rows.len(),
        exchange = ?result.meta.exchange_name,
        "Parsed chart response"
    );

    Ok(rows)
}
