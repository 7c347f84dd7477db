//! EV charging station directory server.
//!
//! Loads charging stations from a live provider, falling back to a
//! bundled dataset, and serves a filterable directory with per-city
//! statistics and map markers.

pub mod cache;
pub mod config;
pub mod directory;
pub mod domain;
pub mod fallback;
pub mod map;
pub mod provider;
pub mod resolver;
pub mod web;
