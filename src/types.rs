use serde::{Deserialize, Serialize};

fn default_rain_prob() -> f64 {
    0.0
}

fn default_temperature() -> f64 {
    25.0
}

/// Body of `POST /predict`. Field names are the wire contract; reordering the
/// derived feature vector silently corrupts predictions, so assembly happens
/// in one place (`service::AppState::predict`), never here.
#[derive(Deserialize, Debug, Clone)]
pub struct PredictionRequest {
    pub driver_code: String,
    pub qualifying_time: f64,
    pub clean_air_race_pace: f64,
    #[serde(default = "default_rain_prob")]
    pub rain_prob: f64,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionMeta {
    pub latency: String,
    pub model: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionResponse {
    pub driver: String,
    pub predicted_pace: f64,
    pub meta: PredictionMeta,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

#[derive(Serialize, Debug)]
pub struct InfoResponse {
    pub message: &'static str,
    pub version: &'static str,
}
