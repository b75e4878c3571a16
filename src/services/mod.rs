pub mod api_logging;
pub mod assembler;
pub mod detector;
pub mod fetcher;
pub mod pipeline;
pub mod transformer;
pub mod validator;
pub mod yahoo;

#[cfg(test)]
pub(crate) mod test_support;

pub use api_logging::{write_api_log_entry, ApiRequestMetrics, ApiStatus};
pub use assembler::{assemble, assemble_detection, AnomalyEntry, AnomalyList, ErrorReply, VolatilityReply};
pub use detector::detect;
pub use fetcher::{fetch_price_series, PriceProvider};
pub use pipeline::VolatilityPipeline;
pub use transformer::{transform, transform_with_window};
pub use validator::{validate_date, validate_range, validate_request, validate_symbol, validate_threshold};
pub use yahoo::YahooClient;
