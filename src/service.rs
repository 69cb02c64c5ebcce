use std::sync::Arc;
use std::time::Instant;

use crate::error::PredictError;
use crate::lookup::LookupStore;
use crate::model::PaceModel;
use crate::types::{PredictionMeta, PredictionRequest, PredictionResponse};
use crate::validate;

pub const SERVICE_NAME: &str = "F1 Race Pace Predictor API";
pub const SERVICE_VERSION: &str = "1.0.0";

/// Everything a request handler needs, constructed once at startup and
/// cloned per handler. Both artifacts are read-only for the process
/// lifetime, so clones share them through `Arc` without locking.
#[derive(Clone)]
pub struct AppState {
    model: Option<Arc<PaceModel>>,
    lookup: Arc<LookupStore>,
}

impl AppState {
    pub fn new(model: Option<PaceModel>, lookup: LookupStore) -> Self {
        Self {
            model: model.map(Arc::new),
            lookup: Arc::new(lookup),
        }
    }

    /// One-time artifact load. Neither missing artifact is fatal: the
    /// service starts degraded and rejects requests predictably instead of
    /// refusing to boot.
    pub fn startup(model_path: &str, lookup_path: &str) -> Self {
        let model = match PaceModel::load(model_path) {
            Ok(m) => {
                tracing::info!(
                    "loaded model '{}' ({} features) from {}",
                    m.name(),
                    m.num_features(),
                    model_path
                );
                Some(m)
            }
            Err(e) => {
                tracing::error!("model unavailable: {:#}", e);
                None
            }
        };
        let lookup = match LookupStore::load(lookup_path) {
            Ok(l) => {
                tracing::info!("loaded lookup table ({} drivers) from {}", l.len(), lookup_path);
                l
            }
            Err(e) => {
                tracing::warn!("serving with empty lookup table: {:#}", e);
                LookupStore::empty()
            }
        };
        Self::new(model, lookup)
    }

    pub fn model_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Validate, assemble the feature vector, run inference, and package the
    /// result with the wall time of the model call.
    pub fn predict(&self, req: &PredictionRequest) -> Result<PredictionResponse, PredictError> {
        let validated = validate::validate(req, &self.lookup)?;
        let model = self.model.as_ref().ok_or(PredictError::ModelUnavailable)?;

        // Column order is a strict contract with the trained model.
        let features = [
            req.qualifying_time,
            req.rain_prob,
            req.temperature,
            validated.team_score,
            req.clean_air_race_pace,
        ];

        let start = Instant::now();
        let predicted_pace = model.predict(&features).map_err(PredictError::Inference)?;
        let elapsed = start.elapsed();

        Ok(PredictionResponse {
            driver: validated.driver,
            predicted_pace,
            meta: PredictionMeta {
                latency: format!("{:.4}s", elapsed.as_secs_f64()),
                model: model.name().to_string(),
            },
        })
    }
}
