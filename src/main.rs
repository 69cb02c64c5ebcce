use pace_predictor::{router, AppState};

// Well-known artifact paths, produced out-of-band by the training pipeline.
// A new model means a new artifact and a process restart; no hot reload.
const MODEL_PATH: &str = "abu_dhabi_ensemble_model.json";
const LOOKUP_PATH: &str = "lookup_data.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8000);

    let state = AppState::startup(MODEL_PATH, LOOKUP_PATH);
    let app = router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
