//! Pre-fitted model artifact: a scaler and a regressor behind small traits,
//! loaded once at startup and shared read-only afterwards.

pub mod artifact;
pub mod regressor;
pub mod scaler;

pub use artifact::ModelArtifact;
pub use regressor::LinearRegressor;
pub use scaler::{MinMaxScaler, StandardScaler};

use crate::error::ModelError;

/// Per-feature transform fitted on the training set.
pub trait Scaler: Send + Sync {
    fn n_features(&self) -> usize;

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError>;
}

/// Maps scaled feature rows to raw model outputs, one per row.
pub trait Regressor: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError>;
}

pub(crate) fn check_width(expected: usize, row: &[f64]) -> Result<(), ModelError> {
    if row.len() != expected {
        return Err(ModelError::FeatureCount {
            expected,
            got: row.len(),
        });
    }
    Ok(())
}
