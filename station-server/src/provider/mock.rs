//! Mock provider for running without network access.
//!
//! Serves provider records from a JSON file (same shape as the live API)
//! or from memory, and can be told to fail in each of the ways the live
//! provider does.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::client::decode_body;
use super::error::ProviderError;
use super::types::ProviderRecord;
use super::{ProviderQuery, StationProvider};

#[derive(Debug)]
enum Behavior {
    Serve(Vec<ProviderRecord>),
    Unavailable(String),
    Malformed(String),
    Hang,
}

/// Provider that answers from canned data.
#[derive(Debug, Clone)]
pub struct MockProvider {
    behavior: Arc<Behavior>,
    calls: Arc<AtomicUsize>,
}

impl MockProvider {
    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior: Arc::new(behavior),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Load records from a JSON file holding a provider response body.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let body = std::fs::read_to_string(path).map_err(|e| ProviderError::Mock {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        let page = decode_body(&body)?;
        Ok(Self::serving(page.records))
    }

    /// Serve the given records, truncated to the query's page size.
    pub fn serving(records: Vec<ProviderRecord>) -> Self {
        Self::with_behavior(Behavior::Serve(records))
    }

    /// Fail every call as a transport-level outage.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Unavailable(message.into()))
    }

    /// Fail every call as an undecodable response.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Malformed(message.into()))
    }

    /// Never answer. Used to exercise caller-side timeouts.
    pub fn hanging() -> Self {
        Self::with_behavior(Behavior::Hang)
    }

    /// Number of fetches made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StationProvider for MockProvider {
    async fn fetch_stations(
        &self,
        query: &ProviderQuery,
    ) -> Result<Vec<ProviderRecord>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior.as_ref() {
            Behavior::Serve(records) => Ok(records
                .iter()
                .take(query.max_results as usize)
                .cloned()
                .collect()),
            Behavior::Unavailable(message) => Err(ProviderError::Api {
                status: 503,
                message: message.clone(),
            }),
            Behavior::Malformed(message) => Err(ProviderError::Json {
                message: message.clone(),
                body: None,
            }),
            Behavior::Hang => std::future::pending().await,
        }
    }
}
