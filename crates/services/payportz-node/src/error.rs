use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use payportz_escrow::EscrowError;
use payportz_multisig::MultisigError;
use serde_json::json;

/// Error response rendered as `{"error": "<message>"}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, error = %self.message, "request failed");
        } else {
            tracing::debug!(status = %self.status, error = %self.message, "request rejected");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<MultisigError> for ApiError {
    fn from(err: MultisigError) -> Self {
        let status = match &err {
            MultisigError::Validation(_) => StatusCode::BAD_REQUEST,
            MultisigError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            MultisigError::NotFound(_) => StatusCode::NOT_FOUND,
            MultisigError::ProposalClosed { .. } => StatusCode::CONFLICT,
            MultisigError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<EscrowError> for ApiError {
    fn from(err: EscrowError) -> Self {
        let status = match &err {
            EscrowError::Validation(_) => StatusCode::BAD_REQUEST,
            EscrowError::NotFound(_) => StatusCode::NOT_FOUND,
            EscrowError::InvalidTransition { .. } => StatusCode::CONFLICT,
            EscrowError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}
