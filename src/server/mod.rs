pub mod api;

use crate::models::ServiceConfig;
use crate::services::{PriceProvider, VolatilityPipeline};
use axum::{http::HeaderValue, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
pub struct AppState<P> {
    pub pipeline: Arc<VolatilityPipeline<P>>,
    pub started_at: Instant,
}

// Manual impl: cloning the state never needs `P: Clone`
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            started_at: self.started_at,
        }
    }
}

impl<P> AppState<P> {
    pub fn new(pipeline: VolatilityPipeline<P>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            started_at: Instant::now(),
        }
    }
}

/// Build the CORS layer; no configured origins means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::OPTIONS])
        .allow_headers(Any);

    if origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    cors.allow_origin(parsed)
}

/// Build the router with all routes and layers
pub fn router<P: PriceProvider>(state: AppState<P>, config: &ServiceConfig) -> Router {
    Router::new()
        .route("/", get(api::index_handler))
        .route("/volatility", get(api::volatility_handler::<P>))
        .route("/health", get(api::health_handler::<P>))
        .layer(cors_layer(&config.cors_origins))
        .with_state(state)
}

/// Initialize tracing once for the process
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// Start the axum server
pub async fn serve<P: PriceProvider>(
    pipeline: VolatilityPipeline<P>,
    config: ServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting volwatch server");

    let provider_name = pipeline.provider().name();
    let app_state = AppState::new(pipeline);

    tracing::info!("Registering routes:");
    tracing::info!("  GET /");
    tracing::info!("  GET /volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31&threshold=2.0");
    tracing::info!("  GET /health");

    let app = router(app_state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(%addr, provider = provider_name, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
