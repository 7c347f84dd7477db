//! Provider-first station loading with static fallback.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::domain::StationSnapshot;
use crate::fallback::DatasetSource;
use crate::provider::{Normalizer, ProviderError, ProviderQuery, ProviderRecord, StationProvider};

use super::config::{ResolverConfig, clamp_page_size};
use super::issue::{ResolveError, SourceIssue};

/// Outcome of one resolve.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub stations: StationSnapshot,
    pub used_fallback: bool,
    pub issue: Option<SourceIssue>,
    pub resolved_at: DateTime<Utc>,
}

impl Resolution {
    fn live(stations: StationSnapshot) -> Self {
        Self {
            stations,
            used_fallback: false,
            issue: None,
            resolved_at: Utc::now(),
        }
    }

    fn fallback(stations: StationSnapshot, issue: SourceIssue) -> Self {
        Self {
            stations,
            used_fallback: true,
            issue: Some(issue),
            resolved_at: Utc::now(),
        }
    }

    /// User-facing notice, present whenever the live source was not used.
    pub fn error_message(&self) -> Option<String> {
        self.issue.as_ref().map(|issue| issue.message().to_string())
    }

    pub fn is_fatal(&self) -> bool {
        self.issue.as_ref().is_some_and(SourceIssue::is_fatal)
    }

    /// Borrow the resolution if it has something to show.
    pub fn ensure_usable(&self) -> Result<&Self, ResolveError> {
        match &self.issue {
            Some(SourceIssue::FallbackUnavailable { detail }) => {
                Err(ResolveError::FallbackUnavailable {
                    detail: detail.clone(),
                })
            }
            _ => Ok(self),
        }
    }
}

/// Loads stations from the provider, falling back to the static dataset.
pub struct Resolver<P, F> {
    provider: P,
    dataset: F,
    config: ResolverConfig,
    normalizer: Mutex<Normalizer>,
}

impl<P, F> Resolver<P, F>
where
    P: StationProvider,
    F: DatasetSource,
{
    pub fn new(provider: P, dataset: F, config: ResolverConfig) -> Self {
        Self {
            provider,
            dataset,
            config,
            normalizer: Mutex::new(Normalizer::from_entropy()),
        }
    }

    /// Replace the normalizer, e.g. with a seeded one.
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Mutex::new(normalizer);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve with the configured page size.
    pub async fn resolve_default(&self) -> Resolution {
        self.resolve(self.config.page_size).await
    }

    /// Fetch one page from the provider and normalize it.
    ///
    /// Never fails: every provider problem is recorded on the resolution
    /// and answered with the static dataset. Only a dataset failure
    /// leaves the resolution empty, flagged fatal.
    pub async fn resolve(&self, page_size: u32) -> Resolution {
        let query = ProviderQuery::new(&self.config.country_code, clamp_page_size(page_size));

        let fetched =
            tokio::time::timeout(self.config.timeout, self.provider.fetch_stations(&query)).await;

        let issue = match fetched {
            Err(_elapsed) => {
                let err = ProviderError::Timeout(self.config.timeout);
                warn!(error = %err, "provider call timed out");
                SourceIssue::SourceUnavailable {
                    detail: err.to_string(),
                }
            }
            Ok(Err(err)) if err.is_malformed() => {
                match &err {
                    ProviderError::Json {
                        body: Some(excerpt),
                        ..
                    } => error!(error = %err, body = %excerpt, "provider returned malformed body"),
                    _ => error!(error = %err, "provider returned malformed body"),
                }
                SourceIssue::SourceMalformed {
                    detail: err.to_string(),
                }
            }
            Ok(Err(err)) => {
                warn!(error = %err, "provider unavailable");
                SourceIssue::SourceUnavailable {
                    detail: err.to_string(),
                }
            }
            Ok(Ok(records)) => match self.normalize(records) {
                Some(snapshot) => {
                    info!(count = snapshot.len(), "loaded stations from provider");
                    return Resolution::live(snapshot);
                }
                None => {
                    info!("provider returned no usable stations");
                    SourceIssue::SourceEmpty
                }
            },
        };

        self.fall_back(issue)
    }

    fn normalize(&self, records: Vec<ProviderRecord>) -> Option<StationSnapshot> {
        let stations = self
            .normalizer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .normalize(records);
        if stations.is_empty() {
            return None;
        }
        // Ids are unique after normalization, so this only fails on a bug.
        match StationSnapshot::new(stations) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                error!(error = %err, "normalized stations rejected");
                None
            }
        }
    }

    fn fall_back(&self, issue: SourceIssue) -> Resolution {
        match self.dataset.load_stations() {
            Ok(snapshot) => {
                info!(
                    count = snapshot.len(),
                    reason = issue.kind(),
                    "serving static dataset"
                );
                Resolution::fallback(snapshot, issue)
            }
            Err(err) => {
                error!(error = %err, cause = %issue, "static dataset unavailable");
                Resolution::fallback(
                    StationSnapshot::empty(),
                    SourceIssue::FallbackUnavailable {
                        detail: err.to_string(),
                    },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::directory::{filter, summarize};
    use crate::domain::{FilterCriteria, StationId};
    use crate::fallback::{DatasetError, StaticDataset};
    use crate::map::{MarkerLayer, MarkerSynchronizer, SyncOutcome};
    use crate::provider::{MockProvider, fixtures};

    struct BrokenDataset;

    impl DatasetSource for BrokenDataset {
        fn load_stations(&self) -> Result<StationSnapshot, DatasetError> {
            Err(DatasetError::Empty)
        }
    }

    fn resolver<P: StationProvider>(provider: P) -> Resolver<P, StaticDataset> {
        Resolver::new(provider, StaticDataset::bundled(), ResolverConfig::default())
            .with_normalizer(Normalizer::seeded(7))
    }

    fn bundled() -> StationSnapshot {
        StaticDataset::bundled().load_stations().unwrap()
    }

    #[tokio::test]
    async fn live_records_are_used() {
        let provider = MockProvider::serving(vec![
            fixtures::record(1),
            fixtures::record(2),
            fixtures::record(3),
        ]);
        let resolution = resolver(provider).resolve(500).await;

        assert_eq!(resolution.stations.len(), 3);
        assert!(!resolution.used_fallback);
        assert!(resolution.issue.is_none());
        assert!(resolution.error_message().is_none());
        assert!(resolution.ensure_usable().is_ok());
    }

    #[tokio::test]
    async fn page_size_is_clamped_before_querying() {
        let records: Vec<_> = (1..=5).map(fixtures::record).collect();
        let resolution = resolver(MockProvider::serving(records)).resolve(0).await;
        assert_eq!(resolution.stations.len(), 1);
    }

    #[tokio::test]
    async fn timeout_falls_back_to_static_dataset() {
        let resolver = Resolver::new(
            MockProvider::hanging(),
            StaticDataset::bundled(),
            ResolverConfig::default().with_timeout(Duration::from_millis(20)),
        );
        let resolution = resolver.resolve(500).await;

        assert!(resolution.used_fallback);
        assert_eq!(resolution.stations, bundled());
        assert!(matches!(
            resolution.issue,
            Some(SourceIssue::SourceUnavailable { .. })
        ));
        assert_eq!(
            resolution.error_message().as_deref(),
            Some("Failed to load charging stations. Showing sample data.")
        );
    }

    #[tokio::test]
    async fn outage_falls_back_to_static_dataset() {
        let resolution = resolver(MockProvider::unavailable("503")).resolve(500).await;
        assert!(resolution.used_fallback);
        assert_eq!(resolution.stations, bundled());
        assert_eq!(
            resolution.issue.as_ref().map(SourceIssue::kind),
            Some("source_unavailable")
        );
    }

    #[tokio::test]
    async fn empty_provider_response_is_informational() {
        let resolution = resolver(MockProvider::serving(Vec::new())).resolve(500).await;
        assert!(resolution.used_fallback);
        assert_eq!(resolution.issue, Some(SourceIssue::SourceEmpty));
        assert_eq!(
            resolution.error_message().as_deref(),
            Some("Unable to load real-time data. Showing sample data.")
        );
        assert!(!resolution.is_fatal());
    }

    #[tokio::test]
    async fn unusable_records_count_as_empty() {
        let record = crate::provider::ProviderRecord {
            address: None,
            ..fixtures::record(1)
        };
        let resolution = resolver(MockProvider::serving(vec![record])).resolve(500).await;
        assert_eq!(resolution.issue, Some(SourceIssue::SourceEmpty));
        assert_eq!(resolution.stations, bundled());
    }

    #[tokio::test]
    async fn malformed_body_is_distinguished() {
        let resolution = resolver(MockProvider::malformed("expected value"))
            .resolve(500)
            .await;
        assert!(resolution.used_fallback);
        assert!(matches!(
            resolution.issue,
            Some(SourceIssue::SourceMalformed { .. })
        ));
        assert_eq!(resolution.stations, bundled());
    }

    #[tokio::test]
    async fn missing_dataset_is_fatal() {
        let resolver = Resolver::new(
            MockProvider::unavailable("down"),
            BrokenDataset,
            ResolverConfig::default(),
        );
        let resolution = resolver.resolve(500).await;

        assert!(resolution.stations.is_empty());
        assert!(resolution.used_fallback);
        assert!(resolution.is_fatal());
        assert!(matches!(
            resolution.ensure_usable(),
            Err(ResolveError::FallbackUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn dataset_not_loaded_when_provider_succeeds() {
        let resolver = Resolver::new(
            MockProvider::serving(vec![fixtures::record(1)]),
            BrokenDataset,
            ResolverConfig::default(),
        );
        let resolution = resolver.resolve(10).await;
        assert_eq!(resolution.stations.len(), 1);
        assert!(!resolution.is_fatal());
    }

    fn record_in(id: u64, town: &str) -> ProviderRecord {
        let mut record = fixtures::record(id);
        if let Some(address) = record.address.as_mut() {
            address.town = Some(town.to_string());
        }
        record
    }

    #[tokio::test]
    async fn undecodable_page_is_malformed_not_empty() {
        use crate::provider::{OpenChargeMapClient, ProviderConfig};
        use wiremock::matchers::method;
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"id":1,"address":{"latitude":"north"}},{"id":2,"connections":"bad"}]"#,
            ))
            .mount(&server)
            .await;
        let client =
            OpenChargeMapClient::new(ProviderConfig::new(None).with_base_url(server.uri()))
                .unwrap();

        let resolution = resolver(client).resolve(500).await;
        assert!(matches!(
            resolution.issue,
            Some(SourceIssue::SourceMalformed { .. })
        ));
        assert_eq!(
            resolution.error_message().as_deref(),
            Some("Failed to load charging stations. Showing sample data.")
        );
        assert_eq!(resolution.stations, bundled());
    }

    #[tokio::test]
    async fn resolved_stations_filter_and_summarize_in_order() {
        let provider = MockProvider::serving(vec![
            record_in(1, "Pune"),
            record_in(2, "Delhi"),
            record_in(3, "Pune"),
        ]);
        let resolution = resolver(provider).resolve(500).await;
        let stations = resolution.stations.as_slice();

        let listed = filter(stations, &FilterCriteria::all());
        let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let summary = summarize(stations);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.get("Pune").map(|s| s.total), Some(2));
        assert_eq!(summary.get("Delhi").map(|s| s.total), Some(1));
    }

    #[tokio::test]
    async fn out_of_range_station_is_listed_but_not_mapped() {
        let provider = MockProvider::serving(vec![
            fixtures::record_at(1, 12.97, 77.59),
            fixtures::record_at(2, 12.97, 200.0),
        ]);
        let resolution = resolver(provider).resolve(500).await;
        assert!(!resolution.used_fallback);

        let listed = filter(resolution.stations.as_slice(), &FilterCriteria::all());
        assert_eq!(listed.len(), 2);

        let mut sync = MarkerSynchronizer::new(MarkerLayer::ready());
        let SyncOutcome::Applied(report) = sync.sync(listed.iter().copied()) else {
            panic!("layer was ready");
        };
        assert_eq!(report.skipped_invalid, 1);
        let placed: Vec<_> = sync.placed_ids().map(StationId::as_str).collect();
        assert_eq!(placed, vec!["1"]);
    }

    #[tokio::test]
    async fn one_provider_call_per_resolve() {
        let provider = MockProvider::unavailable("down");
        let resolver = resolver(provider.clone());
        resolver.resolve(500).await;
        assert_eq!(provider.call_count(), 1);
    }
}
