//! The rendering capability the synchronizer drives.

use crate::domain::{Coordinates, StationId};

use super::bounds::Bounds;
use super::marker::MarkerInfo;

/// A map that can show station markers.
///
/// Implementations only render; deciding which markers exist is the
/// synchronizer's job. Calls are only made while `is_ready` is true.
pub trait MapSurface {
    /// Whether the surface can accept marker operations yet.
    fn is_ready(&self) -> bool;

    fn place_marker(&mut self, id: &StationId, at: Coordinates, info: MarkerInfo);

    fn remove_marker(&mut self, id: &StationId);

    /// Frame the viewport on `bounds`, grown by `padding` of its extent.
    fn fit_bounds(&mut self, bounds: Bounds, padding: f64);
}
