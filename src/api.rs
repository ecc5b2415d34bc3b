// Receipt Points - REST API with Axum
//
// POST /receipts/process     → {"id": "..."}
// GET  /receipts/:id/points  → {"points": N}
// GET  /health               → store size + version

use crate::receipt::{Receipt, ValidationError, FIELD_PURCHASE_DATE, FIELD_PURCHASE_TIME};
use crate::scoring;
use crate::store::ReceiptStore;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const INVALID_RECEIPT: &str = "Invalid receipt received";
pub const INVALID_DATE: &str = "Date is in the wrong format";
pub const INVALID_TIME: &str = "Time is in the wrong format";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ReceiptStore>,
}

impl AppState {
    pub fn new(store: Arc<ReceiptStore>) -> Self {
        AppState { store }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub receipts: usize,
    pub version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// POST /receipts/process - Validate and store a receipt
async fn process_receipt(
    State(state): State<AppState>,
    payload: Result<Json<Receipt>, JsonRejection>,
) -> Response {
    let receipt = match payload {
        Ok(Json(receipt)) => receipt,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected receipt body");
            return error_response(StatusCode::BAD_REQUEST, INVALID_RECEIPT);
        }
    };

    if let Err(errors) = receipt.validate() {
        for e in &errors {
            tracing::warn!(field = %e.field, message = %e.message, "receipt failed validation");
        }
        return error_response(StatusCode::BAD_REQUEST, validation_message(&errors));
    }

    let id = state.store.insert(receipt);
    tracing::info!(%id, "stored receipt");

    (StatusCode::CREATED, Json(ProcessResponse { id })).into_response()
}

/// Structural problems win over date problems, which win over time problems.
fn validation_message(errors: &[ValidationError]) -> &'static str {
    let has = |field: &str| errors.iter().any(|e| e.field == field);

    if errors
        .iter()
        .any(|e| e.field != FIELD_PURCHASE_DATE && e.field != FIELD_PURCHASE_TIME)
    {
        INVALID_RECEIPT
    } else if has(FIELD_PURCHASE_DATE) {
        INVALID_DATE
    } else {
        INVALID_TIME
    }
}

/// GET /receipts/:id/points - Score a stored receipt
async fn get_points(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(receipt) = state.store.get(&id) else {
        tracing::warn!(%id, "points requested for unknown receipt");
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Couldn't find receipt with id={}", id),
        );
    };

    // Scored outside the store lock
    match scoring::breakdown(&receipt) {
        Ok(breakdown) => {
            tracing::debug!(%id, ?breakdown, "scored receipt");
            (
                StatusCode::OK,
                Json(PointsResponse {
                    points: breakdown.total(),
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(%id, error = %e, "stored receipt could not be scored");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /health - Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        receipts: state.store.len(),
        version: crate::VERSION.to_string(),
    })
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
