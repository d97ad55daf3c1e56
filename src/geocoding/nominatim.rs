//! HTTP client for Nominatim-compatible reverse geocoding endpoints.

use crate::geocoding::{GeocodeError, ReverseGeocoder};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
    timeout: Duration,
}

impl NominatimGeocoder {
    pub fn new(endpoint: &str, user_agent: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_status(status: StatusCode, body: String) -> GeocodeError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => GeocodeError::RateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GeocodeError::Authentication {
                status: status.as_u16(),
            },
            _ => GeocodeError::Service {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            },
        }
    }
}

/// Split a `"latitude,longitude"` token into its two numeric parts.
pub fn parse_query(query: &str) -> Result<(f64, f64), GeocodeError> {
    let parts: Vec<&str> = query.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(GeocodeError::InvalidQuery(query.to_string()));
    }

    let latitude = parts[0]
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidQuery(query.to_string()))?;
    let longitude = parts[1]
        .parse::<f64>()
        .map_err(|_| GeocodeError::InvalidQuery(query.to_string()))?;

    Ok((latitude, longitude))
}

#[async_trait::async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, query: &str, language: &str) -> Result<Option<Value>, GeocodeError> {
        let (latitude, longitude) = parse_query(query)?;
        let url = format!("{}/reverse", self.endpoint);

        debug!("GET {} lat={} lon={}", url, latitude, longitude);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("accept-language", language.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeocodeError::Timeout(self.timeout)
                } else {
                    GeocodeError::Transport(e)
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                GeocodeError::Timeout(self.timeout)
            } else {
                GeocodeError::Transport(e)
            }
        })?;

        if !status.is_success() {
            return Err(Self::map_status(status, body));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let page: Value = serde_json::from_str(&body)
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        // Nominatim answers "no result" with 200 and an error object.
        if page.is_null() {
            return Ok(None);
        }
        if let Some(message) = page.get("error") {
            warn!("No reverse geocoding result for '{}': {}", query, message);
            return Ok(None);
        }

        Ok(Some(page))
    }
}
