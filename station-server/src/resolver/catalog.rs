//! The current station snapshot, shared across requests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::directory::{RegionSummary, summarize};
use crate::fallback::DatasetSource;
use crate::provider::StationProvider;

use super::resolve::{Resolution, Resolver};

/// What the catalog currently serves.
#[derive(Debug)]
pub struct CatalogState {
    pub resolution: Resolution,
    /// Per-city statistics for `resolution.stations`.
    pub summary: RegionSummary,
    /// Refresh ticket that installed this state; 0 for the initial load.
    pub generation: u64,
}

impl CatalogState {
    fn new(resolution: Resolution, generation: u64) -> Self {
        let summary = summarize(resolution.stations.as_slice());
        Self {
            resolution,
            summary,
            generation,
        }
    }
}

/// Result of a refresh attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The resolution was installed.
    Applied,
    /// A newer refresh started while this one was in flight; its result
    /// was discarded.
    Superseded,
}

impl RefreshOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshOutcome::Applied => "applied",
            RefreshOutcome::Superseded => "superseded",
        }
    }
}

/// Claim on the right to install a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

/// Thread-safe holder of the current snapshot.
///
/// Readers get an `Arc` to an immutable state and never block refreshes
/// for longer than a pointer swap. Concurrent refreshes resolve
/// independently; only the one started last may install its result.
pub struct StationCatalog {
    state: RwLock<Arc<CatalogState>>,
    issued: AtomicU64,
}

impl StationCatalog {
    pub fn new(initial: Resolution) -> Self {
        Self {
            state: RwLock::new(Arc::new(CatalogState::new(initial, 0))),
            issued: AtomicU64::new(0),
        }
    }

    /// The state currently being served.
    pub async fn current(&self) -> Arc<CatalogState> {
        self.state.read().await.clone()
    }

    /// Start a refresh. Any ticket issued earlier is superseded.
    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Install `resolution` if `ticket` is still the latest one issued.
    pub async fn install(&self, ticket: RefreshTicket, resolution: Resolution) -> RefreshOutcome {
        let mut guard = self.state.write().await;
        if ticket.0 != self.issued.load(Ordering::SeqCst) {
            debug!(ticket = ticket.0, "discarding superseded refresh");
            return RefreshOutcome::Superseded;
        }

        info!(
            generation = ticket.0,
            stations = resolution.stations.len(),
            used_fallback = resolution.used_fallback,
            "installed station snapshot"
        );
        *guard = Arc::new(CatalogState::new(resolution, ticket.0));
        RefreshOutcome::Applied
    }

    /// Re-resolve and install the result unless a newer refresh began.
    pub async fn refresh<P, F>(&self, resolver: &Resolver<P, F>) -> RefreshOutcome
    where
        P: StationProvider,
        F: DatasetSource,
    {
        let ticket = self.begin_refresh();
        let resolution = resolver.resolve_default().await;
        self.install(ticket, resolution).await
    }
}
