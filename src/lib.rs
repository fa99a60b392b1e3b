//! # Duels Dashboard
//!
//! Derived player statistics for the Duels section of a game-stats API.
//!
//! ## Architecture
//!
//! - **models**: Raw stats record, versioned schema, derived stats, rank models
//! - **calculate**: Division, kill/death totals, ratios and most-played mode
//! - **lookup**: Player rank, generic most-played and guild rank helpers
//! - **present**: Accordion view model and plain-text rendering
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod lookup;
pub mod models;
pub mod present;

pub use models::*;
