use crate::error::{AppError, Result};
use crate::models::{PricePoint, PriceSeries};
use crate::utils::format_date;
use chrono::NaiveDate;
use std::future::Future;
use tracing::{debug, info};

/// Source of historical daily closes
///
/// Implementations return whatever rows the upstream has for the range; the
/// fetcher takes care of ordering, de-duplication and range clipping.
pub trait PriceProvider: Send + Sync + 'static {
    /// Short provider name used in logs and /health
    fn name(&self) -> &'static str;

    /// Daily closes for `symbol` with `start <= date < end`
    fn daily_closes(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Future<Output = Result<Vec<PricePoint>>> + Send;
}

/// Fetch and normalize a price series for `[start, end)`
///
/// Fails with `NoDataAvailable` when nothing is left after normalization.
/// Provider errors propagate unchanged; there is no retry.
pub async fn fetch_price_series<P: PriceProvider>(
    provider: &P,
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries> {
    debug!(provider = provider.name(), symbol, %start, %end, "Fetching daily closes");

    let rows = provider.daily_closes(symbol, start, end).await?;
    let raw_count = rows.len();
    let series = PriceSeries::from_rows(rows).within(start, end);

    if series.is_empty() {
        return Err(AppError::NoDataAvailable(format!(
            "no price data for {} between {} and {}",
            symbol,
            format_date(&start),
            format_date(&end)
        )));
    }

    info!(
        symbol,
        raw_rows = raw_count,
        rows = series.len(),
        first = ?series.first_date(),
        last = ?series.last_date(),
        "Fetched price series"
    );

    Ok(series)
}
