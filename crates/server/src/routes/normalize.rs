use crate::error::ServerResult;
use crate::state::ServerState;
use axum::extract::State;
use axum::Json;
use chrono::Utc;
use profilenorm::{run_batch, BatchInput, BatchReport};
use serde_json::Value;
use std::sync::Arc;

/// Normalize one profile record or an array of records.
///
/// The body is handed to the batch runner as-is: an object is a batch of
/// one, an array is a batch, anything else is rejected with `400`.
/// Normalization is CPU-bound, so it runs on the blocking pool.
///
/// # Example
/// ```json
/// // Request
/// [{"urn": "ACoAAB1", "username": "ada-lovelace", "headline": "Engineer"}]
///
/// // Response
/// {
///   "total_received": 1,
///   "filtered": 0,
///   "processed": 1,
///   "failed": 0,
///   "elapsed_micros": 412,
///   "results": [{"urn": "ACoAAB1", "linkedin_url": "https://www.linkedin.com/in/ada-lovelace", "...": "..."}]
/// }
/// ```
pub async fn normalize_records(
    State(state): State<Arc<ServerState>>,
    Json(body): Json<Value>,
) -> ServerResult<Json<BatchReport>> {
    state.counters.record_request();
    let input = BatchInput::from_value(body)?;
    let now = Utc::now();

    let config = state.config.clone();
    let report = tokio::task::spawn_blocking(move || {
        run_batch(input, &config.batch, &config.normalize, now)
    })
    .await??;

    state.counters.record_batch(
        report.total_received,
        report.filtered,
        report.processed,
        report.failed,
    );
    Ok(Json(report))
}
