//! Resolver configuration.

use std::time::Duration;

/// Largest page the provider will be asked for.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Default bound on a single provider call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default country whose stations are listed.
pub const DEFAULT_COUNTRY_CODE: &str = "IN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// ISO 3166-1 alpha-2 country code sent to the provider.
    pub country_code: String,

    /// Records requested per resolve.
    pub page_size: u32,

    /// Upper bound on the provider call; expiry counts as an outage.
    pub timeout: Duration,
}

impl ResolverConfig {
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.country_code = code.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Clamp a requested page size into `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}
