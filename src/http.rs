use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::error::PredictError;
use crate::service::{AppState, SERVICE_NAME, SERVICE_VERSION};
use crate::types::{HealthResponse, InfoResponse, PredictionRequest, PredictionResponse};

async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<PredictionRequest>,
) -> Result<Json<PredictionResponse>, PredictError> {
    state.predict(&payload).map(Json)
}

async fn root() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}
