//! Station filtering and lookup.

use crate::domain::{FilterCriteria, Station, StationId};

/// Stations matching `criteria`, in input order.
///
/// This is a stable filter: list views rely on re-filtering the same
/// snapshot always giving the same order.
pub fn filter<'a>(stations: &'a [Station], criteria: &FilterCriteria) -> Vec<&'a Station> {
    if criteria.is_unconstrained() {
        return stations.iter().collect();
    }
    stations.iter().filter(|s| criteria.matches(s)).collect()
}

/// Find a station by id.
pub fn find_by_id<'a>(stations: &'a [Station], id: &StationId) -> Option<&'a Station> {
    stations.iter().find(|s| &s.id == id)
}
