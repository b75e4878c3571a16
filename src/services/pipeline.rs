//! Volatility anomaly pipeline
//!
//! Validator → Fetcher → Transformer → Detector → Assembler, run once per
//! request. The pipeline holds only the provider and the window size, both set
//! at construction, so one instance is shared read-only by all requests.

use crate::constants::VOLATILITY_WINDOW;
use crate::error::{AppError, Result};
use crate::models::{RequestParams, VolatilityQuery};
use crate::services::assembler::{assemble_detection, VolatilityReply};
use crate::services::detector::detect;
use crate::services::fetcher::{fetch_price_series, PriceProvider};
use crate::services::transformer::transform_with_window;
use crate::services::validator::validate_request;
use tracing::{info, instrument};

pub struct VolatilityPipeline<P> {
    provider: P,
    window: usize,
}

impl<P: PriceProvider> VolatilityPipeline<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            window: VOLATILITY_WINDOW,
        }
    }

    /// Use a different rolling window; the sample estimator needs at least 2
    pub fn with_window(mut self, window: usize) -> Result<Self> {
        if window < 2 {
            return Err(AppError::Config(format!(
                "volatility window must be at least 2, got {}",
                window
            )));
        }
        self.window = window;
        Ok(self)
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Validate a raw query and run it
    pub async fn handle(&self, query: &VolatilityQuery) -> Result<VolatilityReply> {
        let params = validate_request(query)?;
        self.run(&params).await
    }

    /// Run the fetch, transform, detect and assemble stages for validated params
    #[instrument(skip(self, params), fields(symbol = %params.symbol(), period = %params.period()))]
    pub async fn run(&self, params: &RequestParams) -> Result<VolatilityReply> {
        let prices =
            fetch_price_series(&self.provider, params.symbol(), params.start(), params.end()).await?;

        let series = transform_with_window(&prices, self.window);
        if series.points().iter().any(|p| !p.volatility.is_finite()) {
            return Err(AppError::Internal(
                "volatility series contains non-finite values".to_string(),
            ));
        }

        let detection = detect(&series, params.threshold());

        info!(
            price_rows = prices.len(),
            observations = detection.observations,
            cutoff = detection.cutoff,
            anomalies = detection.anomaly_count(),
            "Volatility scan complete"
        );

        Ok(assemble_detection(params, &detection))
    }
}
