use crate::constants::{DEFAULT_FETCH_TIMEOUT_SECS, DEFAULT_MARKET_DATA_BASE_URL, DEFAULT_PORT};
use crate::utils::{
    get_cors_origins, get_fetch_timeout_secs, get_market_data_base_url, get_port,
    get_use_adjusted_close,
};
use std::time::Duration;

/// Runtime configuration for the service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP listen port
    pub port: u16,

    /// Market data provider base URL (no trailing slash)
    pub market_data_base_url: String,

    /// Timeout applied to every provider request
    pub fetch_timeout: Duration,

    /// Prefer adjusted closes when the provider reports them
    pub use_adjusted_close: bool,

    /// Allowed CORS origins, empty for any origin
    pub cors_origins: Vec<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            market_data_base_url: DEFAULT_MARKET_DATA_BASE_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            use_adjusted_close: true,
            cors_origins: Vec::new(),
        }
    }
}

impl ServiceConfig {
    /// Read PORT, MARKET_DATA_BASE_URL, FETCH_TIMEOUT_SECS, USE_ADJUSTED_CLOSE and CORS_ORIGINS
    pub fn from_env() -> Self {
        Self {
            port: get_port(),
            market_data_base_url: get_market_data_base_url(),
            fetch_timeout: Duration::from_secs(get_fetch_timeout_secs()),
            use_adjusted_close: get_use_adjusted_close(),
            cors_origins: get_cors_origins(),
        }
    }

    /// Override the port (e.g. from a CLI flag)
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
