pub mod client;
pub mod error;
pub mod nominatim;
pub mod rate_limiter;

pub use client::{extract_country, LookupResult, RateLimitedLookupClient};
pub use error::GeocodeError;
pub use nominatim::NominatimGeocoder;
pub use rate_limiter::RateLimiter;

use serde_json::Value;

/// A reverse geocoding backend.
///
/// Returns the raw response document, or `None` when the service answered
/// without a result.
#[async_trait::async_trait]
pub trait ReverseGeocoder: Send + Sync {
    async fn reverse(&self, query: &str, language: &str) -> Result<Option<Value>, GeocodeError>;
}
