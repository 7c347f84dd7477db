//! Open Charge Map HTTP client.
//!
//! Issues a single read-only POI query per call. No retries: a failed
//! fetch is reported to the caller, which decides whether to fall back.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use tracing::{debug, warn};

use super::error::ProviderError;
use super::types::{DecodedPage, ProviderPage};
use super::{ProviderQuery, StationProvider};

/// Default base URL for the provider API.
const DEFAULT_BASE_URL: &str = "https://api.openchargemap.io/v3";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// How much of an undecodable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key, sent as the `key` query parameter when present
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl ProviderConfig {
    /// Create a config for the public endpoint.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Client for the Open Charge Map POI API.
#[derive(Debug, Clone)]
pub struct OpenChargeMapClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenChargeMapClient {
    /// Create a new provider client.
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Fetch one page of stations for a country.
    pub async fn fetch_page(&self, query: &ProviderQuery) -> Result<DecodedPage, ProviderError> {
        let url = format!("{}/poi/", self.base_url);

        let mut params = vec![
            ("countrycode", query.country_code.clone()),
            ("maxresults", query.max_results.to_string()),
            ("compact", "true".to_string()),
            ("verbose", "false".to_string()),
            ("includecomments", "false".to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        debug!(country = %query.country_code, max_results = query.max_results, "querying provider");
        let response = self.http.get(&url).query(&params).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProviderError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ProviderError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        decode_body(&body)
    }
}

fn excerpt(body: &str) -> Option<String> {
    Some(body.chars().take(BODY_EXCERPT_CHARS).collect())
}

/// Decode a response body into provider records.
///
/// A page whose records all fail to decode is malformed, not empty.
pub(crate) fn decode_body(body: &str) -> Result<DecodedPage, ProviderError> {
    let page: ProviderPage = serde_json::from_str(body).map_err(|e| ProviderError::Json {
        message: e.to_string(),
        body: excerpt(body),
    })?;

    if let ProviderPage::Envelope(envelope) = &page
        && envelope.is_error
    {
        return Err(ProviderError::Api {
            status: envelope.status_code.unwrap_or(0),
            message: envelope
                .status_message
                .clone()
                .unwrap_or_else(|| "provider reported an error".to_string()),
        });
    }

    let decoded = page.decode();
    if decoded.records.is_empty() && decoded.rejected > 0 {
        return Err(ProviderError::Json {
            message: format!("none of {} records could be decoded", decoded.rejected),
            body: excerpt(body),
        });
    }
    if decoded.rejected > 0 {
        warn!(
            rejected = decoded.rejected,
            kept = decoded.records.len(),
            "provider page contained undecodable records"
        );
    }
    Ok(decoded)
}

impl StationProvider for OpenChargeMapClient {
    async fn fetch_stations(
        &self,
        query: &ProviderQuery,
    ) -> Result<Vec<super::ProviderRecord>, ProviderError> {
        Ok(self.fetch_page(query).await?.records)
    }
}
