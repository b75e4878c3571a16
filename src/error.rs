use thiserror::Error;

/// Closed set of failure kinds surfaced to callers.
///
/// Every `AppError` folds into exactly one kind; the HTTP layer maps kinds to
/// status codes and never looks at the finer-grained variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    NoDataAvailable,
    UpstreamError,
    InternalError,
}

impl ErrorKind {
    /// Whether the failure is attributable to the request rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::NoDataAvailable)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required parameter(s): {}", .0.join(", "))]
    MissingParameters(Vec<String>),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data available: {0}")]
    NoDataAvailable(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingParameters(_) | AppError::InvalidInput(_) => ErrorKind::InvalidInput,
            AppError::NoDataAvailable(_) => ErrorKind::NoDataAvailable,
            AppError::Upstream(_) => ErrorKind::UpstreamError,
            AppError::Internal(_) | AppError::Config(_) => ErrorKind::InternalError,
        }
    }

    /// Short machine-readable code used as the `error` field of replies
    pub fn code(&self) -> &'static str {
        match self {
            AppError::MissingParameters(_) => "Missing parameters",
            AppError::InvalidInput(_) => "Invalid input",
            AppError::NoDataAvailable(_) => "No data available",
            AppError::Upstream(_) => "Upstream error",
            AppError::Internal(_) | AppError::Config(_) => "Internal error",
        }
    }

    /// Guidance shown to the caller next to the message
    pub fn hint(&self) -> &'static str {
        match self {
            AppError::MissingParameters(_) => {
                "Provide symbol, start and end, e.g. /volatility?symbol=AAPL&start=2023-01-01&end=2023-12-31"
            }
            AppError::InvalidInput(_) => {
                "Use an alphabetic symbol, dates as YYYY-MM-DD with start before end, and a positive numeric threshold"
            }
            AppError::NoDataAvailable(_) => {
                "Check that the symbol is listed and that the range covers at least one trading day"
            }
            AppError::Upstream(_) => "The market data provider could not be reached; try again later",
            AppError::Internal(_) | AppError::Config(_) => {
                "Retry the request; if the problem persists contact the service operator"
            }
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Upstream(format!("request timed out: {}", err))
        } else if err.is_decode() {
            AppError::Upstream(format!("malformed provider response: {}", err))
        } else {
            AppError::Upstream(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
