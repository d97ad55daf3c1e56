use std::time::Duration;
use thiserror::Error;

/// Failures raised by the external reverse-geocoding service.
///
/// None of these are recovered from during a run; a response that is merely
/// missing its address data is not an error and never reaches this type.
#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Service timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("Service rejected the request: too many requests")]
    RateLimited,

    #[error("Service refused the request credentials (HTTP {status})")]
    Authentication { status: u16 },

    #[error("Service returned HTTP {status}: {message}")]
    Service { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid coordinate query: '{0}'")]
    InvalidQuery(String),

    #[error("Unparsable service response: {0}")]
    InvalidResponse(String),
}
