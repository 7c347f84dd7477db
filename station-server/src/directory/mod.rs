//! Filter and aggregation engine.
//!
//! Pure derivations over a station collection: the filtered subset for the
//! current criteria, and per-city statistics. Both are recomputed from
//! scratch whenever their inputs change; collections are small (hundreds
//! of stations), so each pass is a plain O(n) scan.

mod filter;
mod summary;

pub use filter::{filter, find_by_id};
pub use summary::{RegionStats, RegionSummary, summarize};
