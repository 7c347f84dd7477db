//! Loading and validating the static dataset.

use std::path::{Path, PathBuf};

use crate::domain::{Station, StationSnapshot};

use super::error::DatasetError;

/// The curated dataset compiled into the binary.
pub const BUNDLED_STATIONS_JSON: &str = include_str!("../../data/stations.json");

/// Trait for loading the fallback station set.
///
/// Loading is local and synchronous; any error is fatal for the caller.
pub trait DatasetSource {
    fn load_stations(&self) -> Result<StationSnapshot, DatasetError>;
}

#[derive(Debug, Clone)]
enum Origin {
    Bundled,
    File(PathBuf),
}

/// Static station dataset, bundled or read from disk.
#[derive(Debug, Clone)]
pub struct StaticDataset {
    origin: Origin,
}

impl StaticDataset {
    /// The dataset compiled into the binary.
    pub fn bundled() -> Self {
        Self {
            origin: Origin::Bundled,
        }
    }

    /// A dataset file on disk, read on every load.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            origin: Origin::File(path.into()),
        }
    }

    /// Path of the dataset file, if not bundled.
    pub fn path(&self) -> Option<&Path> {
        match &self.origin {
            Origin::Bundled => None,
            Origin::File(path) => Some(path),
        }
    }
}

impl Default for StaticDataset {
    fn default() -> Self {
        Self::bundled()
    }
}

impl DatasetSource for StaticDataset {
    fn load_stations(&self) -> Result<StationSnapshot, DatasetError> {
        match &self.origin {
            Origin::Bundled => parse_dataset(BUNDLED_STATIONS_JSON),
            Origin::File(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
                    path: path.display().to_string(),
                    source,
                })?;
                parse_dataset(&json)
            }
        }
    }
}

/// Parse and validate a JSON array of canonical stations.
pub fn parse_dataset(json: &str) -> Result<StationSnapshot, DatasetError> {
    let stations: Vec<Station> = serde_json::from_str(json)?;
    if stations.is_empty() {
        return Err(DatasetError::Empty);
    }

    for station in &stations {
        station
            .validate()
            .map_err(|source| DatasetError::InvalidStation {
                id: station.id.to_string(),
                source,
            })?;
    }

    StationSnapshot::new(stations).map_err(DatasetError::Snapshot)
}
