//! Caching layer for provider responses.
//!
//! The provider returns the same country-wide page for minutes at a time,
//! and it rate-limits aggressively. Pages are cached per query for a short
//! TTL so repeated directory loads share one upstream read.
//!
//! Only non-empty successful pages are cached: an empty page or an error
//! must reach the resolver every time so it can fall back.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::provider::{ProviderError, ProviderQuery, ProviderRecord, StationProvider};

/// Cached page of provider records.
type PageEntry = Arc<Vec<ProviderRecord>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            max_capacity: 64,
        }
    }
}

/// Provider wrapper that caches pages keyed by query.
pub struct CachedProvider<P> {
    inner: P,
    pages: MokaCache<ProviderQuery, PageEntry>,
}

impl<P> CachedProvider<P> {
    pub fn new(inner: P, config: &CacheConfig) -> Self {
        let pages = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { inner, pages }
    }

    /// Drop every cached page so the next fetch goes upstream.
    pub fn invalidate(&self) {
        self.pages.invalidate_all();
    }
}

impl<P> StationProvider for CachedProvider<P>
where
    P: StationProvider + Sync,
{
    async fn fetch_stations(
        &self,
        query: &ProviderQuery,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        if let Some(cached) = self.pages.get(query).await {
            debug!(country = %query.country_code, count = cached.len(), "provider cache hit");
            return Ok(cached.as_ref().clone());
        }

        let records = self.inner.fetch_stations(query).await?;
        if !records.is_empty() {
            self.pages
                .insert(query.clone(), Arc::new(records.clone()))
                .await;
        }
        Ok(records)
    }
}
