use fare_predictor::{api, AppState};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let model_path = env_path("MODEL_PATH", "artifacts/api/fare_model.json");
    let encoder_path = env_path("ENCODER_PATH", "artifacts/api/encoder.json");
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(5000);

    let state = AppState::load(&model_path, &encoder_path)?;
    let fare = state.warmup()?;
    tracing::info!("warmup prediction ok ({:.2})", fare);
    tracing::info!(
        "loaded model; features[{}]: {:?}",
        state.model.in_dim(),
        state.model.feature_names
    );

    let app = api::router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
