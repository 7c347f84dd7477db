//! Headless marker layer rendered by the web client.

use serde::Serialize;

use crate::domain::{Coordinates, StationId};

use super::bounds::Bounds;
use super::marker::MarkerInfo;
use super::surface::MapSurface;

/// Centre of India; the view before any marker has been framed.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 20.5937,
    longitude: 78.9629,
};

pub const DEFAULT_ZOOM: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedMarker {
    pub id: StationId,
    pub coordinates: Coordinates,
    pub info: MarkerInfo,
}

/// What the client should frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    Initial { center: Coordinates, zoom: u8 },
    Fitted { bounds: Bounds, padded: Bounds },
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::Initial {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

/// A [`MapSurface`] that keeps markers in memory, in placement order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MarkerLayer {
    markers: Vec<PlacedMarker>,
    viewport: Viewport,
    #[serde(skip)]
    ready: bool,
}

impl MarkerLayer {
    /// A layer that accepts markers immediately.
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    /// A layer that defers markers until [`MarkerLayer::set_ready`].
    pub fn not_ready() -> Self {
        Self::default()
    }

    pub fn set_ready(&mut self) {
        self.ready = true;
    }

    pub fn markers(&self) -> &[PlacedMarker] {
        &self.markers
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

impl MapSurface for MarkerLayer {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn place_marker(&mut self, id: &StationId, at: Coordinates, info: MarkerInfo) {
        self.markers.push(PlacedMarker {
            id: id.clone(),
            coordinates: at,
            info,
        });
    }

    fn remove_marker(&mut self, id: &StationId) {
        self.markers.retain(|m| &m.id != id);
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding: f64) {
        self.viewport = Viewport::Fitted {
            bounds,
            padded: bounds.padded(padding),
        };
    }
}
