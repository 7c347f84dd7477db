//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::CachedProvider;
use crate::fallback::StaticDataset;
use crate::map::{MarkerLayer, MarkerSynchronizer};
use crate::provider::{
    MockProvider, OpenChargeMapClient, ProviderError, ProviderQuery, ProviderRecord,
    StationProvider,
};
use crate::resolver::{Resolution, Resolver, StationCatalog};

/// The provider the server was started with.
pub enum ProviderBackend {
    /// Open Charge Map behind the response cache.
    Live(CachedProvider<OpenChargeMapClient>),
    /// Canned records, no network.
    Mock(MockProvider),
}

impl ProviderBackend {
    /// Make the next fetch go upstream.
    pub fn invalidate_cache(&self) {
        if let ProviderBackend::Live(cached) = self {
            cached.invalidate();
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderBackend::Live(_) => "open-charge-map",
            ProviderBackend::Mock(_) => "mock",
        }
    }
}

impl StationProvider for ProviderBackend {
    async fn fetch_stations(
        &self,
        query: &ProviderQuery,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        match self {
            ProviderBackend::Live(cached) => cached.fetch_stations(query).await,
            ProviderBackend::Mock(mock) => mock.fetch_stations(query).await,
        }
    }
}

pub type AppResolver = Resolver<ProviderBackend, StaticDataset>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Snapshot currently served
    pub catalog: Arc<StationCatalog>,

    /// Used by refreshes
    pub resolver: Arc<AppResolver>,

    /// Marker state for the map view
    pub map: Arc<Mutex<MarkerSynchronizer<MarkerLayer>>>,
}

impl AppState {
    /// Create a new app state serving `initial`.
    pub fn new(resolver: AppResolver, initial: Resolution) -> Self {
        Self {
            catalog: Arc::new(StationCatalog::new(initial)),
            resolver: Arc::new(resolver),
            map: Arc::new(Mutex::new(MarkerSynchronizer::new(MarkerLayer::ready()))),
        }
    }
}
