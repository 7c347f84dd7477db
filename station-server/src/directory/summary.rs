//! Per-city aggregate statistics.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::Station;

/// Counts for one city, or for the whole network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegionStats {
    pub total: usize,
    pub available_count: usize,
    pub emergency_count: usize,
}

impl RegionStats {
    fn record(&mut self, station: &Station) {
        self.total += 1;
        if station.availability.is_available() {
            self.available_count += 1;
        }
        if station.emergency_capable {
            self.emergency_count += 1;
        }
    }
}

/// City name → counts, ordered by city name.
///
/// Cities are grouped exactly as stored: names that differ only in case
/// or surrounding whitespace form separate groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionSummary {
    regions: BTreeMap<String, RegionStats>,
}

impl RegionSummary {
    pub fn get(&self, city: &str) -> Option<&RegionStats> {
        self.regions.get(city)
    }

    /// Number of distinct cities.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Distinct city names, sorted.
    pub fn cities(&self) -> Vec<&str> {
        self.regions.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RegionStats)> {
        self.regions.iter().map(|(city, stats)| (city.as_str(), stats))
    }

    /// Network-wide counts across every city.
    pub fn totals(&self) -> RegionStats {
        self.regions
            .values()
            .fold(RegionStats::default(), |acc, s| RegionStats {
                total: acc.total + s.total,
                available_count: acc.available_count + s.available_count,
                emergency_count: acc.emergency_count + s.emergency_count,
            })
    }
}

/// Group stations by city and count them.
pub fn summarize(stations: &[Station]) -> RegionSummary {
    let mut regions: BTreeMap<String, RegionStats> = BTreeMap::new();
    for station in stations {
        regions
            .entry(station.city.clone())
            .or_default()
            .record(station);
    }
    RegionSummary { regions }
}
