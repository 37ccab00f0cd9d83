//! Reverse-geocoding provider trait and the HTTP implementation.
//!
//! A provider performs exactly one lookup per call. Rate limiting and retry
//! live one level up in [`super::Locator`].

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use serde::Deserialize;
use std::time::Duration;

use crate::config::GeocoderConfig;
use crate::error::GeocodeError;
use crate::types::Coordinates;

/// User-agent sent with every lookup; the provider rejects bare clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_12_6) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/61.0.3163.100 Safari/537.36";

/// Resolves a coordinate pair into a human-readable locality.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Perform a single lookup.
    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeError>;
}

/// Geocoder backed by the `ws/geocoder/v1` HTTP API.
pub struct HttpGeocoder {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpGeocoder {
    /// Fails if the key is blank or its `${VAR}` reference did not expand.
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let api_key = config.resolved_api_key();
        if api_key.trim().is_empty() || api_key.contains("${") {
            return Err(GeocodeError::MissingApiKey(api_key));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            api_key,
            client,
        })
    }

    /// Build the lookup request without sending it.
    fn request(&self, coords: Coordinates) -> Result<reqwest::Request, GeocodeError> {
        let request = self
            .client
            .get(&self.endpoint)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("location", location_param(coords).as_str()),
            ])
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    fn name(&self) -> &str {
        "http"
    }

    async fn lookup(&self, coords: Coordinates) -> Result<String, GeocodeError> {
        let request = self.request(coords)?;
        tracing::debug!("Geocoding {}", location_param(coords));

        let body = self.client.execute(request).await?.text().await?;
        parse_response(&body)
    }
}

/// Latitude-major `lat,lon` with six decimals, as the provider expects.
pub fn location_param(coords: Coordinates) -> String {
    format!("{:.6},{:.6}", coords.latitude, coords.longitude)
}

#[derive(Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    result: Option<GeocodeResult>,
}

#[derive(Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    ad_info: Option<AdInfo>,
}

#[derive(Deserialize)]
struct AdInfo {
    #[serde(default)]
    name: Option<String>,
}

/// Parse a provider response body into a locality string.
///
/// A positive `status` is a provider-reported failure. On success the
/// `result.ad_info.name` field is returned with surrounding commas removed.
pub fn parse_response(body: &str) -> Result<String, GeocodeError> {
    let response: GeocodeResponse =
        serde_json::from_str(body).map_err(|e| GeocodeError::Parse(e.to_string()))?;

    let status = response.status.unwrap_or(-1);
    if status > 0 {
        return Err(GeocodeError::Provider {
            status,
            message: response.message.unwrap_or_default(),
        });
    }

    response
        .result
        .and_then(|r| r.ad_info)
        .and_then(|a| a.name)
        .map(|name| name.trim_matches(',').to_string())
        .ok_or(GeocodeError::MissingLocality)
}
