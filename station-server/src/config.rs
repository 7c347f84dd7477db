//! Process configuration from environment variables.

use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::provider::ProviderConfig;
use crate::resolver::{DEFAULT_COUNTRY_CODE, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, ResolverConfig};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub api_key: Option<String>,
    /// Provider base URL override
    pub base_url: Option<String>,
    pub country_code: String,
    pub page_size: u32,
    pub fetch_timeout: Duration,
    /// Static dataset file; the bundled dataset when unset
    pub fallback_path: Option<PathBuf>,
    /// Serve provider records from this file instead of the network
    pub mock_data: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        build_app_config(|key| std::env::var(key))
    }

    pub fn provider_config(&self) -> ProviderConfig {
        let config = ProviderConfig::new(self.api_key.clone())
            .with_timeout(self.fetch_timeout.as_secs());
        match &self.base_url {
            Some(url) => config.with_base_url(url.clone()),
            None => config,
        }
    }

    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig::default()
            .with_country_code(self.country_code.clone())
            .with_page_size(self.page_size)
            .with_timeout(self.fetch_timeout)
    }
}

/// Build configuration from an env-var lookup, so tests need not touch
/// the real environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let bind_addr = optional("BIND_ADDR")
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
        .parse::<SocketAddr>()
        .map_err(|e| invalid("BIND_ADDR", e.to_string()))?;

    let country_code =
        optional("STATION_COUNTRY_CODE").unwrap_or_else(|| DEFAULT_COUNTRY_CODE.to_string());
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid(
            "STATION_COUNTRY_CODE",
            format!("expected a two-letter country code, got {country_code:?}"),
        ));
    }

    let page_size = match optional("STATION_PAGE_SIZE") {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|e| invalid("STATION_PAGE_SIZE", e.to_string()))?,
        None => DEFAULT_PAGE_SIZE,
    };
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(invalid(
            "STATION_PAGE_SIZE",
            format!("must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"),
        ));
    }

    let timeout_secs = match optional("STATION_FETCH_TIMEOUT_SECS") {
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| invalid("STATION_FETCH_TIMEOUT_SECS", e.to_string()))?,
        None => DEFAULT_FETCH_TIMEOUT_SECS,
    };
    if timeout_secs == 0 {
        return Err(invalid(
            "STATION_FETCH_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    Ok(AppConfig {
        bind_addr,
        api_key: optional("OCM_API_KEY"),
        base_url: optional("OCM_BASE_URL"),
        country_code: country_code.to_ascii_uppercase(),
        page_size,
        fetch_timeout: Duration::from_secs(timeout_secs),
        fallback_path: optional("STATION_FALLBACK_PATH").map(PathBuf::from),
        mock_data: optional("STATION_MOCK_DATA").map(PathBuf::from),
    })
}
