//! Immutable, shareable station collections.

use std::collections::HashSet;
use std::sync::Arc;

use super::error::DomainError;
use super::station::{Station, StationId};

/// An immutable collection of stations with unique ids.
///
/// Cloning is cheap (the records sit behind an `Arc`), so the same
/// snapshot can be handed to the filter engine and the map synchronizer
/// at once. A refresh builds a new snapshot; an existing one is never
/// modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationSnapshot {
    stations: Arc<[Station]>,
}

impl StationSnapshot {
    /// Build a snapshot, rejecting duplicate ids.
    pub fn new(stations: Vec<Station>) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(stations.len());
        for station in &stations {
            if !seen.insert(&station.id) {
                return Err(DomainError::DuplicateId(station.id.to_string()));
            }
        }
        Ok(Self {
            stations: stations.into(),
        })
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn as_slice(&self) -> &[Station] {
        &self.stations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Station> {
        self.stations.iter()
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|s| &s.id == id)
    }
}

impl<'a> IntoIterator for &'a StationSnapshot {
    type Item = &'a Station;
    type IntoIter = std::slice::Iter<'a, Station>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::station::fixtures::station;

    #[test]
    fn rejects_duplicate_ids() {
        let result = StationSnapshot::new(vec![
            station("1", "Pune"),
            station("2", "Pune"),
            station("1", "Delhi"),
        ]);
        assert_eq!(result, Err(DomainError::DuplicateId("1".into())));
    }

    #[test]
    fn preserves_order_and_lookup() {
        let snapshot =
            StationSnapshot::new(vec![station("b", "Pune"), station("a", "Delhi")]).unwrap();
        let ids: Vec<_> = snapshot.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);

        let a = StationId::parse("a").unwrap();
        assert_eq!(snapshot.get(&a).map(|s| s.city.as_str()), Some("Delhi"));
        assert!(snapshot.get(&StationId::parse("z").unwrap()).is_none());
    }

    #[test]
    fn clones_share_storage() {
        let snapshot = StationSnapshot::new(vec![station("1", "Pune")]).unwrap();
        let copy = snapshot.clone();
        assert!(std::ptr::eq(snapshot.as_slice(), copy.as_slice()));
    }

    #[test]
    fn empty_snapshot() {
        let snapshot = StationSnapshot::empty();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
    }
}
