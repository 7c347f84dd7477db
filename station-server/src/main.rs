use station_server::cache::{CacheConfig, CachedProvider};
use station_server::config::AppConfig;
use station_server::fallback::StaticDataset;
use station_server::provider::{MockProvider, OpenChargeMapClient};
use station_server::resolver::Resolver;
use station_server::web::{AppState, ProviderBackend, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "station_server=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = AppConfig::from_env()?;

    let backend = match &config.mock_data {
        Some(path) => {
            info!(path = %path.display(), "serving provider records from file");
            ProviderBackend::Mock(MockProvider::from_file(path)?)
        }
        None => {
            if config.api_key.is_none() {
                warn!("OCM_API_KEY not set; provider requests may be rate limited");
            }
            let client = OpenChargeMapClient::new(config.provider_config())?;
            ProviderBackend::Live(CachedProvider::new(client, &CacheConfig::default()))
        }
    };

    let dataset = match &config.fallback_path {
        Some(path) => StaticDataset::from_path(path),
        None => StaticDataset::bundled(),
    };

    let resolver = Resolver::new(backend, dataset, config.resolver_config());
    let initial = resolver.resolve_default().await;
    match &initial.issue {
        None => info!(
            provider = resolver.provider().name(),
            stations = initial.stations.len(),
            "station data loaded"
        ),
        Some(issue) if issue.is_fatal() => warn!(%issue, "starting without station data"),
        Some(issue) => warn!(
            %issue,
            stations = initial.stations.len(),
            "serving fallback station data"
        ),
    }

    let app = create_router(AppState::new(resolver, initial));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "station directory listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal, starting graceful shutdown");
}
