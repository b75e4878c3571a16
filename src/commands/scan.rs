use crate::models::{ServiceConfig, VolatilityQuery};
use crate::services::{ErrorReply, VolatilityPipeline, YahooClient};

pub fn init_stderr_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the pipeline once; the reply goes to stdout, failures to stderr as the same JSON error shape
pub async fn run(symbol: String, start: String, end: String, threshold: Option<String>) {
    init_stderr_tracing();

    let config = ServiceConfig::from_env();
    let query = VolatilityQuery {
        symbol: Some(symbol),
        start: Some(start),
        end: Some(end),
        threshold,
    };

    let result = match YahooClient::new(config.market_data_base_url.clone(), config.fetch_timeout) {
        Ok(client) => {
            let pipeline = VolatilityPipeline::new(client.with_adjusted_close(config.use_adjusted_close));
            pipeline.handle(&query).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(reply) => match serde_json::to_string_pretty(&reply) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to serialize reply: {}", e);
                std::process::exit(1);
            }
        },
        Err(err) => {
            let reply = ErrorReply::from(&err);
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&reply).unwrap_or_else(|_| err.to_string())
            );
            std::process::exit(if err.kind().is_client_error() { 2 } else { 1 });
        }
    }
}
