use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use payportz_escrow::{EscrowRequest, TransitionRequest};
use serde_json::{json, Value};
use tracing::info;

use super::{lenient_body, IdQuery};
use crate::app::AppState;
use crate::error::ApiError;

pub async fn create_escrow(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: EscrowRequest = lenient_body(&body);
    let escrow = state.escrows.create(&request).await?;
    info!(escrow_id = %escrow.id, amount = escrow.amount, recipient = %escrow.recipient, "escrow created");
    Ok(Json(json!({ "ok": true, "escrow": escrow })))
}

pub async fn get_escrow(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    match query.id() {
        Some(id) => {
            let escrow = state.escrows.get(id).await?;
            Ok(Json(json!({ "ok": true, "escrow": escrow })))
        }
        None => {
            let escrows = state.escrows.list().await?;
            Ok(Json(json!({ "ok": true, "escrows": escrows })))
        }
    }
}

pub async fn update_escrow(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: TransitionRequest = lenient_body(&body);
    let escrow = state.escrows.apply(&request).await?;
    info!(escrow_id = %escrow.id, status = %escrow.status, "escrow updated");
    Ok(Json(json!({ "ok": true, "escrow": escrow })))
}
