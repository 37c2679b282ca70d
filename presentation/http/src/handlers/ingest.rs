//! ECG ingestion handler

use axum::{extract::State, response::Json};
use tracing::info;
use zayra_core::types::EcgBatch;

use crate::models::{ErrorBody, IngestReceipt, JsonBody};
use crate::{ApiError, AppState};

/// Ingest one ECG batch from a wearable device.
///
/// Only the batch metadata is logged; the samples are dropped here. The
/// `user_id` is not checked against registered users.
#[utoipa::path(
    post,
    path = "/ingest",
    tag = "ecg",
    request_body = EcgBatch,
    responses(
        (status = 200, description = "Batch metadata logged", body = IngestReceipt),
        (status = 422, description = "Body does not describe an ECG batch", body = ErrorBody)
    )
)]
pub async fn ingest_ecg(
    State(state): State<AppState>,
    JsonBody(batch): JsonBody<EcgBatch>,
) -> Result<Json<IngestReceipt>, ApiError> {
    let entry = batch.into_log_entry();
    let user_id = entry.user_id.clone();
    let samples_received = entry.samples_count;

    info!(
        "Ingesting {} samples at {} Hz for user {}",
        samples_received, entry.sampling_rate, user_id
    );
    state.store.append_ingest(entry).await?;

    Ok(Json(IngestReceipt {
        status: "ingested",
        user_id,
        samples_received,
        message: "ECG data processed successfully",
    }))
}
