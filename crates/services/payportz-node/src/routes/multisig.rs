use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::Json;
use payportz_multisig::ProposalRequest;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use super::{lenient_body, IdQuery};
use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ApproveBody {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    signer: Option<String>,
}

pub async fn create_proposal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let request: ProposalRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::bad_request(format!("invalid proposal request: {}", e)))?;
    let proposal = state.engine.create_proposal(&request).await?;
    info!(
        proposal_id = %proposal.id,
        creator = %proposal.creator,
        threshold = proposal.threshold,
        signers = proposal.signers.len(),
        "proposal created"
    );
    Ok(Json(json!({ "ok": true, "proposal": proposal })))
}

pub async fn get_proposal(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<Value>, ApiError> {
    match query.id() {
        Some(id) => {
            let proposal = state.engine.get(id).await?;
            Ok(Json(json!({ "ok": true, "proposal": proposal })))
        }
        None => {
            let proposals = state.engine.list().await?;
            Ok(Json(json!({ "ok": true, "proposals": proposals })))
        }
    }
}

pub async fn approve_proposal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let body: ApproveBody = lenient_body(&body);
    let (id, signer) = match (non_blank(&body.id), non_blank(&body.signer)) {
        (Some(id), Some(signer)) => (id, signer),
        _ => return Err(ApiError::bad_request("id and signer required")),
    };

    let outcome = state.engine.approve(&id, &signer).await?;
    info!(
        proposal_id = %id,
        signer = %signer,
        result = ?outcome.result,
        status = %outcome.proposal.status(),
        "approval processed"
    );
    Ok(Json(json!({
        "ok": true,
        "result": outcome.result,
        "proposal": outcome.proposal,
    })))
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
