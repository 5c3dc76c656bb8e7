use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::health::HealthState;
use crate::api::latency::LatencyStats;
use crate::form::{form_description, render_html, FormController, FormDescription};
use crate::predictor::PredictionService;
use crate::types::{OwnerCount, PredictionResult, ResultView};

#[derive(Clone)]
pub struct ApiState {
    pub service: PredictionService,
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
    pub model_path: String,
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/form", get(get_form))
        .route("/predict", post(post_predict))
        .route("/health", get(get_health))
        .route("/stats/latency", get(get_stats_latency))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Snapshot of the form sent on every edit and every click.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    pub n_clicks: u32,
    pub year: Option<i64>,
    pub mileage: Option<f64>,
    pub km_driven: Option<f64>,
    pub owner: Option<OwnerCount>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    /// `pending`, `price`, `missing_fields` or `error`
    pub status: &'static str,
    pub result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub model_loaded: bool,
    pub model_path: String,
    pub target: String,
    pub predictions_served: u64,
    pub prediction_errors: u64,
}

#[derive(Debug, Serialize)]
pub struct LatencyResponse {
    pub p50_ms: Option<f64>,
    pub p95_ms: Option<f64>,
    pub p99_ms: Option<f64>,
    pub sample_count: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index() -> Html<String> {
    Html(render_html(&form_description()))
}

async fn get_form() -> Json<FormDescription> {
    Json(form_description())
}

async fn post_predict(
    State(state): State<ApiState>,
    Json(req): Json<PredictRequest>,
) -> Json<PredictResponse> {
    // Each submitted value is an edit applied on top of the initial form.
    let mut form = FormController::new();
    form.set_year(req.year);
    form.set_mileage(req.mileage);
    form.set_km_driven(req.km_driven);
    form.set_owner(req.owner);
    form.set_clicks(req.n_clicks);

    let started = Instant::now();
    let view = form.evaluate(&state.service);
    match &view {
        ResultView::Prediction(PredictionResult::Price(_)) => {
            state.latency.record(started.elapsed());
            state.health.inc_predictions_served();
        }
        ResultView::Prediction(PredictionResult::Failed(_)) => {
            state.latency.record(started.elapsed());
            state.health.inc_prediction_errors();
        }
        _ => {}
    }

    let price = match &view {
        ResultView::Prediction(p) => p.price(),
        ResultView::Placeholder => None,
    };
    Json(PredictResponse {
        status: view.status(),
        result: view.to_string(),
        price,
    })
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        model_loaded: state.health.model_loaded(),
        model_path: state.model_path.clone(),
        target: state.service.target().to_string(),
        predictions_served: state.health.predictions_served(),
        prediction_errors: state.health.prediction_errors(),
    })
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    let to_ms = |us: u64| us as f64 / 1000.0;
    let percentiles = state.latency.percentiles();
    Json(LatencyResponse {
        p50_ms: percentiles.map(|(p50, _, _)| to_ms(p50)),
        p95_ms: percentiles.map(|(_, p95, _)| to_ms(p95)),
        p99_ms: percentiles.map(|(_, _, p99)| to_ms(p99)),
        sample_count: state.latency.len(),
    })
}
