//! Web layer for the station directory.
//!
//! Provides JSON endpoints for listing, filtering and mapping stations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppResolver, AppState, ProviderBackend};
