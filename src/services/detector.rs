use crate::models::indicators::{mean, sample_std};
use crate::models::{Anomaly, Detection, ReturnVolatilitySeries};
use tracing::debug;

/// Flag dates whose volatility is strictly above `mean + threshold * std`
///
/// Statistics are taken over the whole series. With fewer than two points the
/// standard deviation is taken as 0, so the cutoff is the mean itself and a
/// single point is never flagged. An empty series yields an empty detection.
pub fn detect(series: &ReturnVolatilitySeries, threshold: f64) -> Detection {
    let volatilities = series.volatilities();

    let Some(mean_volatility) = mean(&volatilities) else {
        return Detection::default();
    };
    let std_volatility = sample_std(&volatilities).unwrap_or(0.0);
    let cutoff = mean_volatility + threshold * std_volatility;

    let anomalies: Vec<Anomaly> = series
        .points()
        .iter()
        .filter(|p| p.volatility > cutoff)
        .map(|p| Anomaly {
            date: p.date,
            volatility: p.volatility,
        })
        .collect();

    debug!(
        observations = volatilities.len(),
        mean_volatility,
        std_volatility,
        cutoff,
        anomalies = anomalies.len(),
        "Detection complete"
    );

    Detection {
        anomalies,
        observations: volatilities.len(),
        mean_volatility,
        std_volatility,
        cutoff,
    }
}
