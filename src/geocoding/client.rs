use crate::config::GeocoderSettings;
use crate::geocoding::{GeocodeError, RateLimiter, ReverseGeocoder};
use crate::utils::constants::{DEFAULT_LANGUAGE, DEFAULT_MIN_DELAY_SECS, DEFAULT_TIMEOUT_SECS};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Outcome of a single country lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Found(String),
    NotFound,
}

impl LookupResult {
    /// The value written into the dataset: the country, or an empty string.
    pub fn into_country(self) -> String {
        match self {
            LookupResult::Found(country) => country,
            LookupResult::NotFound => String::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, LookupResult::Found(_))
    }
}

/// Pull `address.country` out of a raw reverse geocoding response.
pub fn extract_country(raw: &Value) -> Option<String> {
    raw.get("address")?
        .get("country")?
        .as_str()
        .filter(|country| !country.is_empty())
        .map(str::to_string)
}

/// Rate-limited, time-bounded access to a reverse geocoder.
pub struct RateLimitedLookupClient<G> {
    geocoder: G,
    limiter: RateLimiter,
    timeout: Duration,
    language: String,
}

impl<G: ReverseGeocoder> RateLimitedLookupClient<G> {
    pub fn new(geocoder: G) -> Self {
        Self {
            geocoder,
            limiter: RateLimiter::new(Duration::from_secs(DEFAULT_MIN_DELAY_SECS)),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn from_settings(geocoder: G, settings: &GeocoderSettings) -> Self {
        Self::new(geocoder)
            .with_min_delay(settings.min_delay())
            .with_timeout(settings.timeout())
            .with_language(&settings.language)
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.limiter = RateLimiter::new(min_delay);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn min_delay(&self) -> Duration {
        self.limiter.min_delay()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolve a normalized `"latitude,longitude"` token to a country name.
    ///
    /// Missing tokens short-circuit without touching the limiter. Responses
    /// that are absent or lack `address.country` become
    /// [`LookupResult::NotFound`]; every other failure is returned as an error
    /// and is not retried.
    pub async fn lookup_country(&self, token: Option<&str>) -> Result<LookupResult, GeocodeError> {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Ok(LookupResult::NotFound),
        };

        self.limiter.acquire().await;

        let response = tokio::time::timeout(
            self.timeout,
            self.geocoder.reverse(token, &self.language),
        )
        .await
        .map_err(|_| GeocodeError::Timeout(self.timeout))??;

        let result = match response.as_ref().and_then(extract_country) {
            Some(country) => LookupResult::Found(country),
            None => LookupResult::NotFound,
        };

        debug!("Lookup '{}' -> {:?}", token, result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::Instant;

    struct FixedGeocoder {
        response: Option<Value>,
        calls: AtomicUsize,
    }

    impl FixedGeocoder {
        fn new(response: Option<Value>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl ReverseGeocoder for FixedGeocoder {
        async fn reverse(&self, _query: &str, language: &str) -> Result<Option<Value>, GeocodeError> {
            assert_eq!(language, "en");
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct HangingGeocoder;

    #[async_trait::async_trait]
    impl ReverseGeocoder for HangingGeocoder {
        async fn reverse(&self, _query: &str, _language: &str) -> Result<Option<Value>, GeocodeError> {
            std::future::pending().await
        }
    }

    #[test]
    fn test_extract_country() {
        let raw = json!({ "address": { "country": "United Kingdom" } });
        assert_eq!(extract_country(&raw), Some("United Kingdom".to_string()));

        assert_eq!(extract_country(&json!({ "address": {} })), None);
        assert_eq!(extract_country(&json!({ "display_name": "Sea" })), None);
        assert_eq!(extract_country(&json!({ "address": "flat" })), None);
        assert_eq!(extract_country(&json!({ "address": { "country": 7 } })), None);
        assert_eq!(extract_country(&json!({ "address": { "country": "" } })), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_found_country() {
        let client = RateLimitedLookupClient::new(FixedGeocoder::new(Some(json!({
            "address": { "country": "Japan" }
        }))));

        let result = client.lookup_country(Some("35.6895, 139.6917")).await.unwrap();
        assert_eq!(result, LookupResult::Found("Japan".to_string()));
        assert_eq!(result.into_country(), "Japan");
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_token_skips_service_and_limiter() {
        let client = RateLimitedLookupClient::new(FixedGeocoder::new(None));
        let start = Instant::now();

        assert_eq!(client.lookup_country(None).await.unwrap(), LookupResult::NotFound);
        assert_eq!(client.lookup_country(Some("")).await.unwrap(), LookupResult::NotFound);

        // A real call right after must not be delayed by the skipped ones.
        client.lookup_country(Some("1,2")).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(client.geocoder().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_or_shapeless_response_is_not_found() {
        let absent = RateLimitedLookupClient::new(FixedGeocoder::new(None));
        assert_eq!(absent.lookup_country(Some("1,2")).await.unwrap(), LookupResult::NotFound);

        let shapeless = RateLimitedLookupClient::new(FixedGeocoder::new(Some(json!({
            "address": { "road": "A1" }
        }))));
        assert_eq!(shapeless.lookup_country(Some("1,2")).await.unwrap(), LookupResult::NotFound);
    }

    #[tokio::test(start_paused = true)]
    async fn test_calls_respect_min_delay() {
        let client = RateLimitedLookupClient::new(FixedGeocoder::new(None))
            .with_min_delay(Duration::from_secs(2));
        let start = Instant::now();

        for _ in 0..3 {
            client.lookup_country(Some("1,2")).await.unwrap();
        }

        assert_eq!(start.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_service_times_out() {
        let client = RateLimitedLookupClient::new(HangingGeocoder)
            .with_timeout(Duration::from_secs(120));
        let start = Instant::now();

        let result = client.lookup_country(Some("1,2")).await;

        assert!(matches!(result, Err(GeocodeError::Timeout(d)) if d == Duration::from_secs(120)));
        assert_eq!(start.elapsed(), Duration::from_secs(120));
    }
}
