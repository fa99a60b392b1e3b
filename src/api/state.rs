use std::sync::Arc;

use crate::models::StatsSchema;

#[derive(Clone)]
pub struct AppState {
    pub schema: Arc<StatsSchema>,
    /// Default dotted path used when a request gives none
    pub stats_path: Arc<str>,
    pub cors_origin: Arc<str>,
}

impl AppState {
    pub fn new(schema: StatsSchema, stats_path: &str, cors_origin: &str) -> Self {
        Self {
            schema: Arc::new(schema),
            stats_path: Arc::from(stats_path),
            cors_origin: Arc::from(cors_origin),
        }
    }
}
