//! Domain types for the station directory.
//!
//! This module contains the canonical station model and the value objects
//! passed between the engine components. Types enforce their invariants at
//! construction or through an explicit `validate`, so code that receives a
//! snapshot can trust its contents.

mod charger;
mod criteria;
mod error;
mod snapshot;
mod station;

pub use charger::{Availability, ChargerClass, FAST_CHARGER_THRESHOLD_KW, UnknownLabel};
pub use criteria::{FilterCriteria, ViewMode};
pub use error::DomainError;
pub use snapshot::StationSnapshot;
pub use station::{Coordinates, Station, StationId};

#[cfg(test)]
pub(crate) use station::fixtures;
