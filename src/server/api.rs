use crate::error::{AppError, ErrorKind};
use crate::models::VolatilityQuery;
use crate::server::AppState;
use crate::services::{
    write_api_log_entry, ApiRequestMetrics, ErrorReply, PriceProvider, VolatilityReply,
};
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

const INDEX_HTML: &str = include_str!("../../public/index.html");

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::InvalidInput | ErrorKind::NoDataAvailable => StatusCode::BAD_REQUEST,
            ErrorKind::UpstreamError | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(ErrorReply::from(&self))).into_response()
    }
}

/// GET / - Static informational page
#[instrument]
pub async fn index_handler() -> impl IntoResponse {
    Html(INDEX_HTML)
}

/// GET /volatility - Flag dates with abnormal rolling volatility
///
/// Examples:
/// - /volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31
/// - /volatility?symbol=msft&start=2022-01-01&end=2023-01-01&threshold=3
#[instrument(skip_all)]
pub async fn volatility_handler<P: PriceProvider>(
    State(app_state): State<AppState<P>>,
    query: Result<Query<VolatilityQuery>, QueryRejection>,
) -> Response {
    let mut metrics = ApiRequestMetrics::new(Utc::now(), "/volatility");

    // A malformed query string (e.g. a repeated key) still gets the JSON error shape
    let result = match query {
        Ok(Query(params)) => {
            metrics.symbol = params.symbol.clone().unwrap_or_default().to_ascii_uppercase();
            metrics.threshold = params.threshold.clone();
            debug!("Received volatility request with params: {:?}", params);
            run_pipeline(&app_state, params).await
        }
        Err(rejection) => Err(AppError::InvalidInput(rejection.body_text())),
    };

    match result {
        Ok(reply) => {
            metrics.anomaly_count = reply.anomaly_count;
            metrics.complete();
            write_api_log_entry(&metrics);

            info!(
                symbol = %reply.symbol,
                period = %reply.period,
                anomaly_count = reply.anomaly_count,
                "Returning volatility anomalies"
            );
            (StatusCode::OK, Json(reply)).into_response()
        }
        Err(err) => {
            metrics.fail(&err);
            metrics.complete();
            write_api_log_entry(&metrics);

            if err.kind().is_client_error() {
                warn!(error = %err, "Rejected volatility request");
            } else {
                error!(error = %err, "Volatility request failed");
            }
            err.into_response()
        }
    }
}

/// Run the pipeline on its own task so a panic still becomes a JSON 500
async fn run_pipeline<P: PriceProvider>(
    app_state: &AppState<P>,
    params: VolatilityQuery,
) -> crate::error::Result<VolatilityReply> {
    let pipeline = app_state.pipeline.clone();
    match tokio::spawn(async move { pipeline.handle(&params).await }).await {
        Ok(result) => result,
        Err(join_error) => {
            error!(error = %join_error, "Pipeline task failed");
            Err(AppError::Internal("request processing aborted unexpectedly".to_string()))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
    pub provider: &'static str,
}

/// GET /health - Liveness and basic process info
pub async fn health_handler<P: PriceProvider>(State(app_state): State<AppState<P>>) -> impl IntoResponse {
    // No request log for /health (too noisy)
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: app_state.started_at.elapsed().as_secs(),
        provider: app_state.pipeline.provider().name(),
    })
}

#[cfg(test)]
mod tests {
    use crate::models::{ServiceConfig, VolatilityQuery};
    use crate::server::{router, AppState};
    use crate::services::test_support::{volatile_year_closes, StaticProvider};
    use crate::services::VolatilityPipeline;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        Router,
    };
    use chrono::NaiveDate;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app_with(provider: StaticProvider) -> (Router, Arc<VolatilityPipeline<StaticProvider>>) {
        let state = AppState::new(VolatilityPipeline::new(provider));
        let pipeline = state.pipeline.clone();
        (router(state, &ServiceConfig::default()), pipeline)
    }

    fn year_provider() -> StaticProvider {
        StaticProvider::from_closes(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), &volatile_year_closes())
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_volatility_success() {
        let (app, pipeline) = app_with(year_provider());

        let (status, body) = get(app, "/volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "AAPL");
        assert_eq!(body["period"], "2023-01-01 to 2023-12-31");
        assert_eq!(body["threshold"], 2.0);

        let anomalies = body["anomalies"].as_array().unwrap();
        assert!(!anomalies.is_empty());
        assert_eq!(body["anomaly_count"].as_u64().unwrap() as usize, anomalies.len());
        for anomaly in anomalies {
            assert_eq!(anomaly["symbol"], "AAPL");
        }

        // The HTTP reply must be exactly what the pipeline produces for the same query
        let expected = pipeline
            .handle(&VolatilityQuery {
                symbol: Some("AAPL".to_string()),
                start: Some("2023-01-01".to_string()),
                end: Some("2023-12-31".to_string()),
                threshold: None,
            })
            .await
            .unwrap();
        assert_eq!(body, serde_json::to_value(&expected).unwrap());
    }

    #[tokio::test]
    async fn test_anomaly_count_shrinks_with_threshold() {
        let (app, _) = app_with(year_provider());
        let (_, loose) = get(app, "/volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31&threshold=1").await;

        let (app, _) = app_with(year_provider());
        let (_, strict) = get(app, "/volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31&threshold=2").await;

        assert!(loose["anomaly_count"].as_u64().unwrap() >= strict["anomaly_count"].as_u64().unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_query_key_is_json_bad_request() {
        let (app, pipeline) = app_with(year_provider());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/volatility?symbol=AAPL&symbol=MSFT&start=2023-01-01&end=2023-12-31")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Invalid input");
        assert!(body["message"].as_str().unwrap().contains("symbol"));
        assert!(body["hint"].is_string());
        assert_eq!(pipeline.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_parameters_skip_fetch() {
        let (app, pipeline) = app_with(year_provider());

        let (status, body) = get(app, "/volatility?symbol=AAPL&start=2023-01-01").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing parameters");
        assert!(body["message"].as_str().unwrap().contains("end"));
        assert!(body["hint"].is_string());
        assert_eq!(pipeline.provider().calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_inputs_are_bad_requests() {
        for uri in [
            "/volatility?symbol=AAPL1&start=2023-01-01&end=2023-12-31",
            "/volatility?symbol=AAPL&start=2023/01/01&end=2023-12-31",
            "/volatility?symbol=AAPL&start=2023-06-01&end=2023-01-01",
            "/volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31&threshold=abc",
        ] {
            let (app, pipeline) = app_with(year_provider());

            let (status, body) = get(app, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "uri = {}", uri);
            assert_eq!(body["error"], "Invalid input", "uri = {}", uri);
            assert_eq!(pipeline.provider().calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_no_data_is_bad_request() {
        let (app, _) = app_with(StaticProvider::new(Vec::new()));

        let (status, body) = get(app, "/volatility?symbol=ZZZZ&start=2023-01-01&end=2023-12-31").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No data available");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_server_error() {
        let (app, _) = app_with(StaticProvider::failing("connection reset"));

        let (status, body) = get(app, "/volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Upstream error");
        assert!(body["message"].as_str().unwrap().contains("connection reset"));
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = app_with(StaticProvider::new(Vec::new()));

        let (status, body) = get(app, "/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["provider"], "static");
    }

    #[tokio::test]
    async fn test_index_page() {
        let (app, _) = app_with(StaticProvider::new(Vec::new()));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/volatility"));
    }
}
