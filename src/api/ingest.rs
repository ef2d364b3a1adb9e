//! Delivery surface for the queue collaborator.

use crate::aggregation::{BatchReport, QueueRecord};
use crate::api::AppState;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRequest {
    pub records: Vec<QueueRecord>,
}

/// Accepts one delivery batch and reports the ids needing redelivery.
///
/// Always 200: per-record failures are data in the report, not an HTTP
/// error.
pub async fn ingest_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Json<BatchReport> {
    Json(state.consumer.process_batch(req.records).await)
}
