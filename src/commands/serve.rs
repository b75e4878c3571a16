use crate::models::ServiceConfig;
use crate::server;
use crate::services::{VolatilityPipeline, YahooClient};

pub async fn run(port: Option<u16>) {
    server::init_tracing();

    let config = ServiceConfig::from_env().with_port(port);
    tracing::info!(
        port = config.port,
        market_data = %config.market_data_base_url,
        timeout_secs = config.fetch_timeout.as_secs(),
        adjusted_close = config.use_adjusted_close,
        "Loaded configuration"
    );

    let client = match YahooClient::new(config.market_data_base_url.clone(), config.fetch_timeout) {
        Ok(client) => client.with_adjusted_close(config.use_adjusted_close),
        Err(e) => {
            eprintln!("❌ Failed to create market data client: {}", e);
            std::process::exit(1);
        }
    };

    let pipeline = VolatilityPipeline::new(client);

    if let Err(e) = server::serve(pipeline, config).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
