//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directory::{RegionStats, RegionSummary};
use crate::domain::{FilterCriteria, Station, ViewMode};
use crate::map::{MarkerLayer, PlacedMarker, SyncReport, Viewport};
use crate::resolver::{Resolution, Severity};

/// Filters shared by the list and map endpoints.
///
/// Empty values mean "all", matching the directory page's default
/// dropdown entries.
#[derive(Debug, Default, Deserialize)]
pub struct StationQuery {
    /// Free-text search over owner, location and city
    pub q: Option<String>,

    pub city: Option<String>,

    /// `Normal` or `Fast`, any case
    pub charger_class: Option<String>,

    /// `Available`, `Busy` or `Offline`, any case
    pub availability: Option<String>,

    /// `grid`, `list` or `map` (default)
    pub view: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl StationQuery {
    /// Parse into criteria and view mode; the error names the bad value.
    pub fn parse(&self) -> Result<(FilterCriteria, ViewMode), String> {
        let mut criteria = FilterCriteria::all();
        if let Some(q) = self.q.as_deref() {
            criteria = criteria.with_search_text(q);
        }
        // Cities are matched verbatim, so only blankness is checked here.
        if let Some(city) = self.city.as_deref()
            && !city.trim().is_empty()
        {
            criteria = criteria.with_city(city);
        }
        if let Some(class) = present(&self.charger_class) {
            criteria = criteria.with_charger_class(class.parse().map_err(|e| format!("{e}"))?);
        }
        if let Some(availability) = present(&self.availability) {
            criteria =
                criteria.with_availability(availability.parse().map_err(|e| format!("{e}"))?);
        }
        let view = match present(&self.view) {
            Some(view) => view.parse()?,
            None => ViewMode::default(),
        };
        Ok((criteria, view))
    }
}

/// Where the served stations came from.
#[derive(Debug, Serialize)]
pub struct SourceStatus {
    pub used_fallback: bool,

    /// Notice to show the user, if any
    pub error_message: Option<String>,

    pub issue_kind: Option<&'static str>,

    pub severity: Option<Severity>,

    /// RFC 3339 timestamp
    pub resolved_at: String,

    pub station_count: usize,
}

impl SourceStatus {
    pub fn from_resolution(resolution: &Resolution) -> Self {
        Self {
            used_fallback: resolution.used_fallback,
            error_message: resolution.error_message(),
            issue_kind: resolution.issue.as_ref().map(|i| i.kind()),
            severity: resolution.issue.as_ref().map(|i| i.severity()),
            resolved_at: resolution.resolved_at.to_rfc3339(),
            station_count: resolution.stations.len(),
        }
    }
}

/// Markers and viewport for the map view.
#[derive(Debug, Serialize)]
pub struct MapView {
    pub markers: Vec<PlacedMarker>,
    pub viewport: Viewport,

    /// Absent when the sync was deferred
    pub report: Option<SyncReport>,
}

impl MapView {
    pub fn from_layer(layer: &MarkerLayer, report: Option<SyncReport>) -> Self {
        Self {
            markers: layer.markers().to_vec(),
            viewport: layer.viewport(),
            report,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StationListResponse {
    pub stations: Vec<Station>,

    /// Stations after filtering
    pub count: usize,

    /// Stations before filtering
    pub total: usize,

    pub source: SourceStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<MapView>,
}

/// One city's row in the regions table.
#[derive(Debug, Serialize)]
pub struct RegionRow {
    pub city: String,
    pub total: usize,
    pub available_count: usize,
    pub emergency_count: usize,
}

#[derive(Debug, Serialize)]
pub struct RegionsResponse {
    pub regions: Vec<RegionRow>,
    pub cities: Vec<String>,
    pub totals: RegionStats,
    pub source: SourceStatus,
}

impl RegionsResponse {
    pub fn new(summary: &RegionSummary, source: SourceStatus) -> Self {
        let regions = summary
            .iter()
            .map(|(city, stats)| RegionRow {
                city: city.to_string(),
                total: stats.total,
                available_count: stats.available_count,
                emergency_count: stats.emergency_count,
            })
            .collect();

        Self {
            regions,
            cities: summary.cities().into_iter().map(str::to_string).collect(),
            totals: summary.totals(),
            source,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    /// `applied` or `superseded`
    pub outcome: &'static str,
    pub source: SourceStatus,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Availability, ChargerClass};

    fn query(
        charger_class: Option<&str>,
        availability: Option<&str>,
        view: Option<&str>,
    ) -> StationQuery {
        StationQuery {
            charger_class: charger_class.map(str::to_string),
            availability: availability.map(str::to_string),
            view: view.map(str::to_string),
            ..StationQuery::default()
        }
    }

    #[test]
    fn empty_query_is_unconstrained_map_view() {
        let (criteria, view) = StationQuery::default().parse().unwrap();
        assert!(criteria.is_unconstrained());
        assert_eq!(view, ViewMode::Map);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        let (criteria, view) = query(Some("fast"), Some("BUSY"), Some("Grid"))
            .parse()
            .unwrap();
        assert_eq!(criteria.charger_class, Some(ChargerClass::Fast));
        assert_eq!(criteria.availability, Some(Availability::Busy));
        assert_eq!(view, ViewMode::Grid);
    }

    #[test]
    fn blank_values_mean_all() {
        let q = StationQuery {
            city: Some("  ".into()),
            ..query(Some(""), None, Some(""))
        };
        let (criteria, view) = q.parse().unwrap();
        assert!(criteria.is_unconstrained());
        assert_eq!(view, ViewMode::Map);
    }

    #[test]
    fn city_is_kept_verbatim() {
        let q = StationQuery {
            city: Some("Kochi ".into()),
            ..StationQuery::default()
        };
        let (criteria, _) = q.parse().unwrap();
        assert_eq!(criteria.city.as_deref(), Some("Kochi "));
    }

    #[test]
    fn unknown_labels_are_rejected() {
        let err = query(Some("turbo"), None, None).parse().unwrap_err();
        assert_eq!(err, "unknown charger class: turbo");
        assert!(query(None, None, Some("globe")).parse().is_err());
    }
}
