pub mod escrow;
pub mod multisig;

use axum::routing::{get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::app::AppState;

/// `?id=` filter shared by the list/get endpoints. An empty id lists.
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}

/// Decode a JSON body, treating anything unparsable as an empty object.
pub(crate) fn lenient_body<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

pub fn register_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/escrow",
            post(escrow::create_escrow)
                .get(escrow::get_escrow)
                .put(escrow::update_escrow),
        )
        .route(
            "/multisig",
            post(multisig::create_proposal).get(multisig::get_proposal),
        )
        .route("/multisig/approve", post(multisig::approve_proposal))
        .with_state(state)
}
