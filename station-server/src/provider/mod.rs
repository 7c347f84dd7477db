//! Remote station provider: client, mock, and record normalizer.
//!
//! The remote source is an Open Charge Map style POI feed. Key
//! characteristics:
//! - One parameterized read per load (country code + maximum result count)
//! - Records are loosely structured; any field may be missing
//! - The service is unreliable enough that callers must be ready to fall
//!   back to bundled data (see [`crate::resolver`])

mod client;
mod error;
mod mock;
pub mod normalize;
mod types;

use std::future::Future;

pub use client::{OpenChargeMapClient, ProviderConfig};
pub use error::ProviderError;
pub use mock::MockProvider;
pub use normalize::{Normalizer, RawRecord};
pub use types::{
    DecodedPage, ProviderAddress, ProviderConnection, ProviderId, ProviderOperator,
    ProviderRecord, ProviderStatusType,
};

#[cfg(test)]
pub(crate) use types::fixtures;

/// Parameters of a provider read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProviderQuery {
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
    /// Maximum number of records to return
    pub max_results: u32,
}

impl ProviderQuery {
    pub fn new(country_code: impl Into<String>, max_results: u32) -> Self {
        Self {
            country_code: country_code.into(),
            max_results,
        }
    }
}

/// Trait for fetching raw station records.
///
/// This abstraction lets the resolver run against the live API, a cache,
/// or canned data in tests.
pub trait StationProvider {
    /// Fetch one page of provider-native records.
    fn fetch_stations(
        &self,
        query: &ProviderQuery,
    ) -> impl Future<Output = Result<Vec<ProviderRecord>, ProviderError>> + Send;
}
