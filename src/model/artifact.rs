use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::{LinearRegressor, MinMaxScaler, Regressor, Scaler, StandardScaler};
use crate::error::{AppError, Result};
use crate::types::PriceTarget;

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ScalerSpec {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum RegressorSpec {
    Linear(LinearRegressor),
}

#[derive(Debug, Deserialize)]
struct ArtifactFile {
    feature_names: Vec<String>,
    scaler: ScalerSpec,
    regressor: RegressorSpec,
    #[serde(default)]
    target: PriceTarget,
}

// ---------------------------------------------------------------------------
// Loaded artifact
// ---------------------------------------------------------------------------

/// The fitted (regressor, scaler) pair. Immutable once built.
pub struct ModelArtifact {
    pub regressor: Box<dyn Regressor>,
    pub scaler: Box<dyn Scaler>,
    /// Column names the scaler was fitted on, in fit order.
    pub feature_names: Vec<String>,
    pub target: PriceTarget,
}

impl std::fmt::Debug for ModelArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelArtifact")
            .field("feature_names", &self.feature_names)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl ModelArtifact {
    pub fn new(
        regressor: Box<dyn Regressor>,
        scaler: Box<dyn Scaler>,
        feature_names: Vec<String>,
        target: PriceTarget,
    ) -> Self {
        Self {
            regressor,
            scaler,
            feature_names,
            target,
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Artifact(format!("cannot read {}: {e}", path.display()))
        })?;
        let artifact = Self::from_json_str(&raw)?;
        info!(
            path = %path.display(),
            features = artifact.feature_names.len(),
            target = %artifact.target,
            "Model artifact loaded"
        );
        Ok(artifact)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: ArtifactFile = serde_json::from_str(raw)?;
        let width = file.feature_names.len();
        if width == 0 {
            return Err(AppError::Artifact("feature_names is empty".to_string()));
        }

        let scaler: Box<dyn Scaler> = match file.scaler {
            ScalerSpec::Standard(s) => {
                expect_len("scaler.mean", s.mean.len(), width)?;
                expect_len("scaler.scale", s.scale.len(), width)?;
                if let Some(i) = s.scale.iter().position(|v| *v == 0.0 || !v.is_finite()) {
                    return Err(AppError::Artifact(format!(
                        "scaler.scale[{i}] must be finite and non-zero"
                    )));
                }
                Box::new(s)
            }
            ScalerSpec::MinMax(s) => {
                expect_len("scaler.data_min", s.data_min.len(), width)?;
                expect_len("scaler.data_max", s.data_max.len(), width)?;
                if let Some(i) = s
                    .data_min
                    .iter()
                    .zip(&s.data_max)
                    .position(|(lo, hi)| !(hi - lo).is_finite() || hi - lo == 0.0)
                {
                    return Err(AppError::Artifact(format!(
                        "scaler range for feature {i} is empty"
                    )));
                }
                Box::new(s)
            }
        };

        let regressor: Box<dyn Regressor> = match file.regressor {
            RegressorSpec::Linear(r) => {
                expect_len("regressor.coefficients", r.coefficients.len(), width)?;
                Box::new(r)
            }
        };

        Ok(Self::new(regressor, scaler, file.feature_names, file.target))
    }
}

fn expect_len(field: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(AppError::Artifact(format!(
            "{field} has {got} entries, expected {expected}"
        )));
    }
    Ok(())
}
