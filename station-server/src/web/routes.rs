//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::directory;
use crate::domain::{Station, StationId};
use crate::map::SyncOutcome;
use crate::resolver::{CatalogState, ResolveError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/stations/:id", get(station_detail))
        .route("/api/regions", get(regions))
        .route("/api/map", get(map_view))
        .route("/api/map/select/:id", post(select_marker))
        .route("/api/refresh", post(refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Current catalog state, or 503 if there is nothing to serve.
async fn usable_state(state: &AppState) -> Result<Arc<CatalogState>, AppError> {
    let current = state.catalog.current().await;
    current.resolution.ensure_usable()?;
    Ok(current)
}

fn parse_id(raw: &str) -> Result<StationId, AppError> {
    StationId::parse(raw).map_err(|e| AppError::BadRequest {
        message: e.to_string(),
    })
}

/// Bring the shared marker layer in line with `stations`.
async fn sync_map(state: &AppState, stations: &[&Station]) -> MapView {
    let mut map = state.map.lock().await;
    let report = match map.sync(stations.iter().copied()) {
        SyncOutcome::Applied(report) => Some(report),
        SyncOutcome::Deferred => None,
    };
    MapView::from_layer(map.surface(), report)
}

/// Filtered station list, with markers for the map view.
async fn list_stations(
    State(state): State<AppState>,
    Query(req): Query<StationQuery>,
) -> Result<Json<StationListResponse>, AppError> {
    let (criteria, view) = req.parse().map_err(|message| AppError::BadRequest { message })?;
    let current = usable_state(&state).await?;
    let all = current.resolution.stations.as_slice();

    let filtered = directory::filter(all, &criteria);
    let map = if view.shows_map() {
        Some(sync_map(&state, &filtered).await)
    } else {
        None
    };

    Ok(Json(StationListResponse {
        count: filtered.len(),
        total: all.len(),
        stations: filtered.into_iter().cloned().collect(),
        source: SourceStatus::from_resolution(&current.resolution),
        map,
    }))
}

/// A single station.
async fn station_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Station>, AppError> {
    let id = parse_id(&id)?;
    let current = usable_state(&state).await?;

    directory::find_by_id(current.resolution.stations.as_slice(), &id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Station not found: {id}"),
        })
}

/// Per-city statistics.
async fn regions(State(state): State<AppState>) -> Result<Json<RegionsResponse>, AppError> {
    let current = usable_state(&state).await?;
    Ok(Json(RegionsResponse::new(
        &current.summary,
        SourceStatus::from_resolution(&current.resolution),
    )))
}

/// Markers for the filtered stations.
async fn map_view(
    State(state): State<AppState>,
    Query(req): Query<StationQuery>,
) -> Result<Json<MapView>, AppError> {
    let (criteria, _view) = req.parse().map_err(|message| AppError::BadRequest { message })?;
    let current = usable_state(&state).await?;
    let filtered = directory::filter(current.resolution.stations.as_slice(), &criteria);
    Ok(Json(sync_map(&state, &filtered).await))
}

/// A marker click.
async fn select_marker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Station>, AppError> {
    let id = parse_id(&id)?;
    let map = state.map.lock().await;
    map.select(&id)
        .map(|selected| Json(selected.station))
        .ok_or_else(|| AppError::NotFound {
            message: format!("No marker for station {id}"),
        })
}

/// Re-resolve the station list, bypassing the provider cache.
async fn refresh(State(state): State<AppState>) -> Json<RefreshResponse> {
    state.resolver.provider().invalidate_cache();
    let outcome = state.catalog.refresh(&*state.resolver).await;
    let current = state.catalog.current().await;
    info!(outcome = outcome.as_str(), "refresh requested");

    Json(RefreshResponse {
        outcome: outcome.as_str(),
        source: SourceStatus::from_resolution(&current.resolution),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        warn!(error = %e, "serving without station data");
        AppError::Unavailable {
            message: e.user_message().to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        if status.is_server_error() {
            warn!(%status, %message, "request failed");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
