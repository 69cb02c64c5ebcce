//! Race-pace prediction service: loads a trained gradient-boosted ensemble
//! and a driver→team-score lookup table at startup, then serves validated,
//! latency-annotated pace predictions over HTTP.

pub mod error;
pub mod http;
pub mod lookup;
pub mod model;
pub mod service;
pub mod types;
pub mod validate;

pub use error::PredictError;
pub use http::router;
pub use lookup::LookupStore;
pub use model::PaceModel;
pub use service::AppState;
