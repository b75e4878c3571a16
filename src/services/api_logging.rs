use crate::error::AppError;
use chrono::{DateTime, Utc};

/// Per-request metrics for /volatility
#[derive(Debug, Clone)]
pub struct ApiRequestMetrics {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_ms: u64,
    pub status: ApiStatus,
    pub endpoint: String,
    pub symbol: String,
    pub threshold: Option<String>,
    pub anomaly_count: usize,
    pub error_code: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiStatus {
    Success,
    ClientError,
    ServerError,
}

impl ApiRequestMetrics {
    pub fn new(start_time: DateTime<Utc>, endpoint: &str) -> Self {
        Self {
            start_time,
            end_time: start_time,
            duration_ms: 0,
            status: ApiStatus::Success,
            endpoint: endpoint.to_string(),
            symbol: String::new(),
            threshold: None,
            anomaly_count: 0,
            error_code: None,
        }
    }

    /// Record a failure; the status follows the error's kind
    pub fn fail(&mut self, err: &AppError) {
        self.status = if err.kind().is_client_error() {
            ApiStatus::ClientError
        } else {
            ApiStatus::ServerError
        };
        self.error_code = Some(err.code());
    }

    pub fn complete(&mut self) {
        self.end_time = Utc::now();
        self.duration_ms = (self.end_time - self.start_time).num_milliseconds().max(0) as u64;
    }

    /// Compact single-line form written to the `api_requests` log target
    pub fn to_log_line(&self) -> String {
        let status_str = match self.status {
            ApiStatus::Success => "OK",
            ApiStatus::ClientError => "FAIL",
            ApiStatus::ServerError => "ERROR",
        };

        let duration_str = if self.duration_ms >= 1000 {
            format!("{}.{:01}s", self.duration_ms / 1000, (self.duration_ms % 1000) / 100)
        } else {
            format!("{}ms", self.duration_ms)
        };

        let symbol = if self.symbol.is_empty() { "-" } else { self.symbol.as_str() };

        let error_info = if let Some(code) = self.error_code {
            format!(" error:{}", code)
        } else {
            String::new()
        };

        format!(
            "{} | {} | {} | {} | symbol:{} threshold:{} anomalies:{}{}",
            self.start_time.format("%Y-%m-%d %H:%M:%S"),
            duration_str,
            self.endpoint,
            status_str,
            symbol,
            self.threshold.as_deref().unwrap_or("default"),
            self.anomaly_count,
            error_info
        )
    }
}

/// Write compact request log entry
pub fn write_api_log_entry(metrics: &ApiRequestMetrics) {
    tracing::info!(target: "api_requests", "{}", metrics.to_log_line());
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn test_api_request_metrics() {
        let start_time = Utc.with_ymd_and_hms(2024, 12, 1, 15, 30, 45).unwrap();
        let mut metrics = ApiRequestMetrics::new(start_time, "/volatility");

        metrics.symbol = "AAPL".to_string();
        metrics.anomaly_count = 3;
        metrics.complete();

        assert_eq!(metrics.status, ApiStatus::Success);
        assert!(metrics.end_time >= start_time);
    }

    #[test]
    fn test_log_line_success() {
        let start_time = Utc.with_ymd_and_hms(2024, 12, 1, 15, 30, 45).unwrap();
        let mut metrics = ApiRequestMetrics::new(start_time, "/volatility");
        metrics.symbol = "AAPL".to_string();
        metrics.threshold = Some("2.5".to_string());
        metrics.anomaly_count = 4;
        metrics.end_time = start_time + Duration::milliseconds(1530);
        metrics.duration_ms = 1530;

        assert_eq!(
            metrics.to_log_line(),
            "2024-12-01 15:30:45 | 1.5s | /volatility | OK | symbol:AAPL threshold:2.5 anomalies:4"
        );
    }

    #[test]
    fn test_fail_sets_status_from_kind() {
        let start_time = Utc.with_ymd_and_hms(2024, 12, 1, 15, 30, 45).unwrap();

        let mut metrics = ApiRequestMetrics::new(start_time, "/volatility");
        metrics.fail(&AppError::MissingParameters(vec!["symbol".to_string()]));
        assert_eq!(metrics.status, ApiStatus::ClientError);
        assert!(metrics.to_log_line().ends_with("symbol:- threshold:default anomalies:0 error:Missing parameters"));

        let mut metrics = ApiRequestMetrics::new(start_time, "/volatility");
        metrics.fail(&AppError::Upstream("reset".to_string()));
        assert_eq!(metrics.status, ApiStatus::ServerError);
    }
}
