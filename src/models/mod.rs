//! Core data models for the dashboard.

mod rank;
pub mod record;
mod schema;
mod stats;

pub use rank::*;
pub use record::StatsRecord;
pub use schema::*;
pub use stats::*;
