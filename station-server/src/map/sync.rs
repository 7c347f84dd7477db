//! Reconciling placed markers with a station list.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::domain::{Station, StationId};

use super::bounds::Bounds;
use super::marker::MarkerInfo;
use super::surface::MapSurface;

/// Padding ratio applied when framing markers.
pub const DEFAULT_PADDING: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncConfig {
    /// Fraction of the marker extent added around the framed viewport.
    pub padding: f64,
}

impl SyncConfig {
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
        }
    }
}

/// What one applied sync did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    /// Markers newly placed.
    pub placed: usize,
    /// Markers removed because their station left the list.
    pub removed: usize,
    /// Markers removed and placed again because their record changed.
    pub replaced: usize,
    /// Markers left as they were.
    pub unchanged: usize,
    /// Stations not placed because their coordinates are out of range.
    pub skipped_invalid: usize,
    /// Markers on the surface afterwards.
    pub total_markers: usize,
    /// Bounds the viewport was fitted to, before padding.
    pub fitted: Option<Bounds>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    Applied(SyncReport),
    /// The surface is not ready; the list will be applied by
    /// [`MarkerSynchronizer::surface_ready`].
    Deferred,
}

/// A marker click.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSelected {
    pub station: Station,
}

/// Keeps the markers on a [`MapSurface`] in step with a station list.
pub struct MarkerSynchronizer<S> {
    surface: S,
    config: SyncConfig,
    placed: BTreeMap<StationId, Station>,
    pending: Option<Vec<Station>>,
}

impl<S: MapSurface> MarkerSynchronizer<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, SyncConfig::default())
    }

    pub fn with_config(surface: S, config: SyncConfig) -> Self {
        Self {
            surface,
            config,
            placed: BTreeMap::new(),
            pending: None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Ids of the markers currently placed, in id order.
    pub fn placed_ids(&self) -> impl Iterator<Item = &StationId> {
        self.placed.keys()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Make the surface show exactly the mappable stations in `stations`.
    ///
    /// If the surface is not ready the list is kept, replacing any list
    /// kept earlier, and applied once the surface reports ready.
    pub fn sync<'a, I>(&mut self, stations: I) -> SyncOutcome
    where
        I: IntoIterator<Item = &'a Station>,
    {
        if !self.surface.is_ready() {
            self.pending = Some(stations.into_iter().cloned().collect());
            debug!("map surface not ready, deferring marker sync");
            return SyncOutcome::Deferred;
        }
        self.pending = None;
        SyncOutcome::Applied(self.apply(stations))
    }

    /// Apply the deferred list, if any. Call when the surface becomes
    /// ready; returns `None` if there was nothing to apply or the surface
    /// is still not ready.
    pub fn surface_ready(&mut self) -> Option<SyncReport> {
        if !self.surface.is_ready() {
            return None;
        }
        let pending = self.pending.take()?;
        Some(self.apply(&pending))
    }

    /// Resolve a marker click to its station.
    pub fn select(&self, id: &StationId) -> Option<StationSelected> {
        self.placed.get(id).map(|station| StationSelected {
            station: station.clone(),
        })
    }

    fn apply<'a, I>(&mut self, stations: I) -> SyncReport
    where
        I: IntoIterator<Item = &'a Station>,
    {
        let mut report = SyncReport::default();

        let mut seen = HashSet::new();
        let mut target: Vec<&Station> = Vec::new();
        for station in stations {
            if let Err(err) = station.coordinates.validate_range() {
                debug!(id = %station.id, error = %err, "not placing marker");
                report.skipped_invalid += 1;
                continue;
            }
            if seen.insert(&station.id) {
                target.push(station);
            }
        }

        let wanted: BTreeMap<&StationId, &Station> =
            target.iter().map(|s| (&s.id, *s)).collect();

        // Removals before additions.
        let stale: Vec<StationId> = self
            .placed
            .iter()
            .filter(|(id, placed)| wanted.get(id).is_none_or(|s| *s != *placed))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &stale {
            self.surface.remove_marker(id);
            self.placed.remove(id);
            if wanted.contains_key(id) {
                report.replaced += 1;
            } else {
                report.removed += 1;
            }
        }

        for station in target {
            if self.placed.contains_key(&station.id) {
                report.unchanged += 1;
                continue;
            }
            self.surface
                .place_marker(&station.id, station.coordinates, MarkerInfo::from(station));
            self.placed.insert(station.id.clone(), station.clone());
            if !stale.contains(&station.id) {
                report.placed += 1;
            }
        }

        report.total_markers = self.placed.len();
        if let Some(bounds) = Bounds::from_coords(self.placed.values().map(|s| &s.coordinates)) {
            self.surface.fit_bounds(bounds, self.config.padding);
            report.fitted = Some(bounds);
        }

        debug!(
            placed = report.placed,
            removed = report.removed,
            replaced = report.replaced,
            total = report.total_markers,
            "markers synchronized"
        );
        report
    }
}
