mod api;
mod config;
mod error;
mod form;
mod model;
mod predictor;
mod types;

use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::api::routes::{router, ApiState};
use crate::config::Config;
use crate::error::Result;
use crate::model::ModelArtifact;
use crate::predictor::PredictionService;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    // --- Model artifact: loaded once, shared read-only ---
    let artifact = Arc::new(ModelArtifact::load(&cfg.model_path)?);
    if let Some(target) = cfg.price_target {
        if target != artifact.target {
            warn!(
                "PRICE_TARGET={target} overrides the artifact's recorded target ({})",
                artifact.target
            );
        }
    }
    let service = PredictionService::new(Arc::clone(&artifact), cfg.price_target);
    info!("Prediction service ready (target: {})", service.target());

    let health = Arc::new(HealthState::new());
    health.set_model_loaded(true);

    // --- HTTP server ---
    let api_state = ApiState {
        service,
        health,
        latency: Arc::new(LatencyStats::new()),
        model_path: cfg.model_path.clone(),
    };
    let app = router(api_state);
    let bind_addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Car price form available at http://{bind_addr}/");

    axum::serve(listener, app).await?;

    Ok(())
}
