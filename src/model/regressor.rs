use serde::{Deserialize, Serialize};

use super::{check_width, Regressor};
use crate::error::ModelError;

/// Ordinary linear model: `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, ModelError> {
        rows.iter()
            .map(|row| {
                check_width(self.n_features(), row)?;
                let y = self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, w)| x * w)
                        .sum::<f64>();
                if !y.is_finite() {
                    return Err(ModelError::Inference(format!(
                        "linear model produced a non-finite output ({y})"
                    )));
                }
                Ok(y)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicts_one_value_per_row() {
        let m = LinearRegressor {
            coefficients: vec![2.0, -1.0],
            intercept: 0.5,
        };
        let out = m.predict(&[vec![1.0, 1.0], vec![0.0, 3.0]]).unwrap();
        assert_eq!(out, vec![1.5, -2.5]);
    }

    #[test]
    fn empty_table_gives_empty_output() {
        let m = LinearRegressor {
            coefficients: vec![1.0],
            intercept: 0.0,
        };
        assert!(m.predict(&[]).unwrap().is_empty());
    }

    #[test]
    fn non_finite_output_fails() {
        let m = LinearRegressor {
            coefficients: vec![f64::MAX, f64::MAX],
            intercept: 0.0,
        };
        let err = m.predict(&[vec![2.0, 2.0]]).unwrap_err();
        assert!(matches!(err, ModelError::Inference(_)), "got {err:?}");
        assert!(err.to_string().contains("non-finite"), "got {err}");
    }

    #[test]
    fn wrong_width_row_fails() {
        let m = LinearRegressor {
            coefficients: vec![1.0, 1.0, 1.0, 1.0],
            intercept: 0.0,
        };
        let err = m.predict(&[vec![1.0, 2.0, 3.0]]).unwrap_err();
        assert_eq!(err, ModelError::FeatureCount { expected: 4, got: 3 });
    }
}
