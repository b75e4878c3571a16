use chrono::NaiveDate;
use serde::Serialize;

/// A trading date whose volatility is above the cutoff
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anomaly {
    pub date: NaiveDate,
    pub volatility: f64,
}

/// Outcome of running the detector over a full volatility series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    /// Anomalies in chronological order
    pub anomalies: Vec<Anomaly>,

    /// Number of volatility values the statistics were computed from
    pub observations: usize,

    pub mean_volatility: f64,

    /// Sample standard deviation, 0.0 when fewer than two observations
    pub std_volatility: f64,

    pub cutoff: f64,
}

impl Detection {
    pub fn anomaly_count(&self) -> usize {
        self.anomalies.len()
    }
}
