//! Bundled static station dataset.
//!
//! Used when the remote provider fails or returns nothing. The dataset is
//! curated: every record must already satisfy the station invariants, and
//! loading fails rather than silently dropping a bad entry.

mod dataset;
mod error;

pub use dataset::{BUNDLED_STATIONS_JSON, DatasetSource, StaticDataset};
pub use error::DatasetError;
