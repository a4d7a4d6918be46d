//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::protocol::{
    decode_receipt, ItemPayload, PointsResponse, ProcessReceiptResponse, ReceiptPayload,
};
use crate::web::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use bytes::Bytes;
use receipt_processor_core::{
    domain::ReceiptId,
    ports::PortError,
    scoring,
    validation::{validate, Violation},
};
use std::sync::Arc;
use tracing::{debug, error, info, warn, Level};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        process_receipt_handler,
        get_points_handler,
    ),
    components(
        schemas(ReceiptPayload, ItemPayload, ProcessReceiptResponse, PointsResponse)
    ),
    tags(
        (name = "Receipt Processor API", description = "Submit receipts and look up the points they earned.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// REST API Handlers
//=========================================================================================

fn reject(violation: Violation) -> (StatusCode, String) {
    warn!(kind = violation.code(), "Rejected receipt: {}", violation);
    (StatusCode::BAD_REQUEST, violation.to_string())
}

/// Submit a receipt for processing.
///
/// The receipt is validated, scored and stored. The returned id can be used
/// to look up the points later.
#[utoipa::path(
    post,
    path = "/receipts/process",
    request_body = ReceiptPayload,
    responses(
        (status = 200, description = "Returns the ID assigned to the receipt", body = ProcessReceiptResponse),
        (status = 400, description = "The receipt is invalid"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn process_receipt_handler(
    State(app_state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let receipt = decode_receipt(&body).map_err(reject)?;
    let validated = validate(&receipt).map_err(reject)?;

    let points = scoring::score(&validated);
    if tracing::enabled!(Level::DEBUG) {
        debug!(points, "Score breakdown: {}", scoring::breakdown(&validated));
    }

    let stored = app_state
        .store
        .put(validated.into_receipt(), points)
        .await
        .map_err(|e| {
            error!("Failed to store receipt: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to store receipt".to_string(),
            )
        })?;

    info!(id = %stored.id, points, "Processed receipt");
    Ok(Json(ProcessReceiptResponse {
        id: stored.id.to_string(),
    }))
}

/// Get the points awarded for a receipt.
#[utoipa::path(
    get,
    path = "/receipts/{id}/points",
    responses(
        (status = 200, description = "The number of points awarded", body = PointsResponse),
        (status = 404, description = "No receipt found for that ID")
    ),
    params(
        ("id" = String, Path, description = "The ID of the receipt.")
    )
)]
pub async fn get_points_handler(
    State(app_state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let not_found = || (StatusCode::NOT_FOUND, "No receipt found for that ID.".to_string());

    let id = raw_id.parse::<ReceiptId>().map_err(|e| {
        debug!("{}", e);
        not_found()
    })?;

    match app_state.store.get(id).await {
        Ok(stored) => Ok(Json(PointsResponse {
            points: stored.points,
        })),
        Err(PortError::NotFound(_)) => Err(not_found()),
        Err(e) => {
            error!("Failed to look up receipt {}: {:?}", id, e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to look up receipt".to_string(),
            ))
        }
    }
}
