use crate::constants::{NO_ANOMALIES_MESSAGE, VOLATILITY_DECIMALS};
use crate::error::AppError;
use crate::models::{Anomaly, Detection, RequestParams};
use crate::utils::{format_date, round_to};
use chrono::NaiveDate;
use serde::Serialize;

/// One flagged date in the reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyEntry {
    /// YYYY-MM-DD
    pub date: String,
    /// Rounded to 5 decimals
    pub volatility: f64,
    pub symbol: String,
}

/// Either the flagged dates or a placeholder sentence when there are none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnomalyList {
    Detected(Vec<AnomalyEntry>),
    Empty(String),
}

/// Statistics behind the cutoff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionSummary {
    pub observations: usize,
    pub mean_volatility: f64,
    pub std_volatility: f64,
    pub cutoff: f64,
}

/// Successful /volatility reply
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolatilityReply {
    pub symbol: String,
    pub period: String,
    pub threshold: f64,
    pub anomaly_count: usize,
    pub anomalies: AnomalyList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<DetectionSummary>,
}

/// Structured failure reply; every error path renders through this
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReply {
    pub error: String,
    pub message: String,
    pub hint: String,
}

impl From<&AppError> for ErrorReply {
    fn from(err: &AppError) -> Self {
        Self {
            error: err.code().to_string(),
            message: err.to_string(),
            hint: err.hint().to_string(),
        }
    }
}

/// Map anomalies into the reply shape, echoing the request
pub fn assemble(
    symbol: &str,
    start: NaiveDate,
    end: NaiveDate,
    threshold: f64,
    anomalies: &[Anomaly],
) -> VolatilityReply {
    let entries: Vec<AnomalyEntry> = anomalies
        .iter()
        .map(|a| AnomalyEntry {
            date: format_date(&a.date),
            volatility: round_to(a.volatility, VOLATILITY_DECIMALS),
            symbol: symbol.to_string(),
        })
        .collect();

    let anomaly_count = entries.len();
    let anomalies = if entries.is_empty() {
        AnomalyList::Empty(NO_ANOMALIES_MESSAGE.to_string())
    } else {
        AnomalyList::Detected(entries)
    };

    VolatilityReply {
        symbol: symbol.to_string(),
        period: format!("{} to {}", format_date(&start), format_date(&end)),
        threshold,
        anomaly_count,
        anomalies,
        summary: None,
    }
}

/// [`assemble`] for a validated request, attaching the detection statistics
pub fn assemble_detection(params: &RequestParams, detection: &Detection) -> VolatilityReply {
    let mut reply = assemble(
        params.symbol(),
        params.start(),
        params.end(),
        params.threshold(),
        &detection.anomalies,
    );
    reply.summary = Some(DetectionSummary {
        observations: detection.observations,
        mean_volatility: round_to(detection.mean_volatility, VOLATILITY_DECIMALS),
        std_volatility: round_to(detection.std_volatility, VOLATILITY_DECIMALS),
        cutoff: round_to(detection.cutoff, VOLATILITY_DECIMALS),
    });
    reply
}
