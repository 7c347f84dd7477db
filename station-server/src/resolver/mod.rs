//! Data source resolution.
//!
//! Decides where the station list comes from: the live provider when it
//! yields usable records, otherwise the bundled static dataset. Every
//! provider failure is recovered here and reported as a [`SourceIssue`]
//! on the [`Resolution`]; the only hard failure is losing the static
//! dataset as well.
//!
//! [`StationCatalog`] holds the resolution currently being served and
//! arbitrates concurrent refreshes.

mod catalog;
mod config;
mod issue;
mod resolve;

pub use catalog::{CatalogState, RefreshOutcome, RefreshTicket, StationCatalog};
pub use config::{
    DEFAULT_COUNTRY_CODE, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT, MAX_PAGE_SIZE, ResolverConfig,
    clamp_page_size,
};
pub use issue::{ResolveError, Severity, SourceIssue};
pub use resolve::{Resolution, Resolver};
