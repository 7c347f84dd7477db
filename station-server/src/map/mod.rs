//! Map marker synchronization.
//!
//! The map itself is an injected [`MapSurface`]; [`MarkerSynchronizer`]
//! owns the record of which stations have markers and issues the minimal
//! remove/place calls to bring the surface in line with a new list.
//! [`MarkerLayer`] is the headless surface the web layer serializes.

mod bounds;
mod layer;
mod marker;
mod surface;
mod sync;

pub use bounds::Bounds;
pub use layer::{DEFAULT_CENTER, DEFAULT_ZOOM, MarkerLayer, PlacedMarker, Viewport};
pub use marker::{MarkerInfo, MarkerTone};
pub use surface::MapSurface;
pub use sync::{
    DEFAULT_PADDING, MarkerSynchronizer, StationSelected, SyncConfig, SyncOutcome, SyncReport,
};
