use serde::{Deserialize, Serialize};

use super::{check_width, Scaler};
use crate::error::ModelError;

/// `(x - mean) / scale`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(self.n_features(), row)?;
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (m, s))| (x - m) / s)
            .collect())
    }
}

/// `(x - data_min) / (data_max - data_min)`, mapping the training range onto [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxScaler {
    pub data_min: Vec<f64>,
    pub data_max: Vec<f64>,
}

impl Scaler for MinMaxScaler {
    fn n_features(&self) -> usize {
        self.data_min.len()
    }

    fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ModelError> {
        check_width(self.n_features(), row)?;
        Ok(row
            .iter()
            .zip(self.data_min.iter().zip(&self.data_max))
            .map(|(x, (lo, hi))| (x - lo) / (hi - lo))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scaler_centers_and_scales() {
        let s = StandardScaler {
            mean: vec![2015.0, 20.0],
            scale: vec![4.0, 2.0],
        };
        let out = s.transform(&[2023.0, 19.0]).unwrap();
        assert!((out[0] - 2.0).abs() < 1e-12, "out={out:?}");
        assert!((out[1] + 0.5).abs() < 1e-12, "out={out:?}");
    }

    #[test]
    fn min_max_scaler_maps_range() {
        let s = MinMaxScaler {
            data_min: vec![0.0, 1.0],
            data_max: vec![100.0, 4.0],
        };
        let out = s.transform(&[25.0, 4.0]).unwrap();
        assert_eq!(out, vec![0.25, 1.0]);
    }

    #[test]
    fn wrong_width_is_rejected() {
        let s = StandardScaler {
            mean: vec![0.0; 4],
            scale: vec![1.0; 4],
        };
        let err = s.transform(&[1.0, 2.0]).unwrap_err();
        assert_eq!(err, ModelError::FeatureCount { expected: 4, got: 2 });
    }
}
