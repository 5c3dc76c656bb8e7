use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::FEATURE_COLUMNS;
use crate::error::ModelError;
use crate::model::ModelArtifact;
use crate::types::{CompleteFeatureRow, FeatureRow, PredictionResult, PriceTarget};

/// Turns a form snapshot into a price. Holds the shared artifact; never mutates it.
#[derive(Debug, Clone)]
pub struct PredictionService {
    artifact: Arc<ModelArtifact>,
    target: PriceTarget,
}

impl PredictionService {
    /// `target_override` wins over the target recorded in the artifact.
    pub fn new(artifact: Arc<ModelArtifact>, target_override: Option<PriceTarget>) -> Self {
        let target = target_override.unwrap_or(artifact.target);
        Self { artifact, target }
    }

    pub fn target(&self) -> PriceTarget {
        self.target
    }

    pub fn predict(&self, row: &FeatureRow) -> PredictionResult {
        let Some(row) = row.complete() else {
            debug!(?row, "Prediction skipped: missing fields");
            return PredictionResult::MissingFields;
        };

        match self.score(&row) {
            Ok(raw) => PredictionResult::Price(self.to_price(raw)),
            Err(e) => {
                error!(
                    year = row.year,
                    mileage = row.mileage,
                    km_driven = row.km_driven,
                    owner = row.owner.value(),
                    "Error during prediction: {e}"
                );
                PredictionResult::Failed(e.to_string())
            }
        }
    }

    /// Raw regressor output for one complete row.
    fn score(&self, row: &CompleteFeatureRow) -> Result<f64, ModelError> {
        let table = self.build_table(row)?;
        let scaled = self.artifact.scaler.transform(&table)?;
        debug!(?scaled, "Scaled input for prediction");

        let outputs = self.artifact.regressor.predict(&[scaled])?;
        outputs.first().copied().ok_or(ModelError::EmptyPrediction)
    }

    fn build_table(&self, row: &CompleteFeatureRow) -> Result<Vec<f64>, ModelError> {
        if self.artifact.feature_names != FEATURE_COLUMNS {
            return Err(ModelError::FeatureNames {
                expected: self.artifact.feature_names.clone(),
                got: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            });
        }
        let values = row.values();
        if let Some(i) = values.iter().position(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite(FEATURE_COLUMNS[i].to_string()));
        }
        Ok(values.to_vec())
    }

    fn to_price(&self, raw: f64) -> f64 {
        match self.target {
            PriceTarget::Price => raw,
            PriceTarget::LogPrice => {
                let price = raw.exp();
                if price.is_infinite() {
                    warn!(raw, "exp() overflowed on model output, falling back to the raw value");
                    raw
                } else {
                    price
                }
            }
        }
    }
}
