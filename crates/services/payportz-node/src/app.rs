use axum::http::Method;
use axum::Router;
use payportz_escrow::EscrowStore;
use payportz_multisig::MultisigEngine;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::routes::register_routes;
use crate::services::Services;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<MultisigEngine>,
    pub escrows: Arc<EscrowStore>,
}

impl AppState {
    pub fn new(services: &Services) -> Self {
        Self {
            engine: services.engine.clone(),
            escrows: services.escrows.clone(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    register_routes(state).layer(cors)
}
