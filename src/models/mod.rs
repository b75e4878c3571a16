mod anomaly;
mod price_series;
mod request_params;
mod service_config;
mod volatility;
pub mod indicators;

pub use anomaly::{Anomaly, Detection};
pub use price_series::{PricePoint, PriceSeries};
pub use request_params::{RequestParams, VolatilityQuery};
pub use service_config::ServiceConfig;
pub use volatility::{ReturnVolatilitySeries, VolatilityPoint};
