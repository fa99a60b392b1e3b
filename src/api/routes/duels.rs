use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{DuelsReport, StatsRecord, StatsSchema};
use crate::present::{self, Accordion};

#[derive(Debug, Deserialize)]
pub struct RecordParams {
    /// Dotted path of the stats object inside the posted document
    pub path: Option<String>,
}

pub async fn schema(State(state): State<AppState>) -> Json<StatsSchema> {
    Json(state.schema.as_ref().clone())
}

pub async fn derive(
    State(state): State<AppState>,
    Query(params): Query<RecordParams>,
    body: Bytes,
) -> Result<Json<DuelsReport>, ApiError> {
    let record = parse_record(&state, params.path.as_deref(), &body)?;
    Ok(Json(calculate::build_report(&record, &state.schema)))
}

pub async fn view(
    State(state): State<AppState>,
    Query(params): Query<RecordParams>,
    body: Bytes,
) -> Result<Json<Accordion>, ApiError> {
    let record = parse_record(&state, params.path.as_deref(), &body)?;
    Ok(Json(present::build_view(&record, &state.schema)))
}

/// Parse a posted document into a stats record. An empty body is an empty record.
pub(crate) fn parse_record(
    state: &AppState,
    path: Option<&str>,
    body: &[u8],
) -> Result<StatsRecord, ApiError> {
    let document = parse_document(body)?;
    let record = StatsRecord::from_document(document, path, &state.stats_path);
    tracing::debug!("Parsed stats record with {} fields", record.len());
    Ok(record)
}

pub(crate) fn parse_document(body: &[u8]) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))
}
