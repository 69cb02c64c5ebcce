use axum::{http::StatusCode, response::IntoResponse, response::Response, Json};
use serde_json::json;
use thiserror::Error;

/// Every way a prediction can fail, so the HTTP boundary handles each kind
/// explicitly instead of collapsing everything into a generic 500.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictError {
    /// Malformed or domain-unrealistic input. Client-attributable.
    #[error("{0}")]
    Validation(String),

    /// Competitor code absent from the lookup table. Client-attributable;
    /// the message enumerates valid codes so callers can self-correct.
    #[error("Unknown driver code '{code}'. Known codes: {known}")]
    UnknownDriver { code: String, known: String },

    /// No model artifact was loaded at startup. A deployment problem, not a
    /// per-request one.
    #[error("Model not loaded")]
    ModelUnavailable,

    /// The model call itself failed (e.g. feature-length mismatch).
    #[error("inference failed: {0}")]
    Inference(String),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::Validation(_) | PredictError::UnknownDriver { .. } => {
                StatusCode::BAD_REQUEST
            }
            PredictError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// True when the fault lies with the request, not the deployment.
    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
