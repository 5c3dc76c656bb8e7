//! Counters behind the /health endpoint. Written by the predict handler, read by /health.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Default)]
pub struct HealthState {
    /// Set once the artifact has been loaded at startup.
    pub model_loaded: AtomicBool,
    /// Evaluations that produced a price.
    pub predictions_served: AtomicU64,
    /// Evaluations that reached the model and failed.
    pub prediction_errors: AtomicU64,
}

impl HealthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_model_loaded(&self, v: bool) {
        self.model_loaded.store(v, Ordering::Relaxed);
    }

    pub fn inc_predictions_served(&self) {
        self.predictions_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_prediction_errors(&self) {
        self.prediction_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn model_loaded(&self) -> bool {
        self.model_loaded.load(Ordering::Relaxed)
    }

    pub fn predictions_served(&self) -> u64 {
        self.predictions_served.load(Ordering::Relaxed)
    }

    pub fn prediction_errors(&self) -> u64 {
        self.prediction_errors.load(Ordering::Relaxed)
    }
}
