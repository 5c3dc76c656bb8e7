use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Model artifact error: {0}")]
    Artifact(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::Json(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, self.to_string()).into_response()
    }
}

/// Failures raised while building, scaling, or scoring a feature row.
/// The `Display` text is what ends up after "An error occurred: ".
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("The feature names should match those that were passed during fit. Expected {expected:?}, got {got:?}")]
    FeatureNames {
        expected: Vec<String>,
        got: Vec<String>,
    },

    #[error("X has {got} features, but the model is expecting {expected} features as input")]
    FeatureCount { expected: usize, got: usize },

    #[error("Input contains a non-finite value in column '{0}'")]
    NonFinite(String),

    #[error("model returned no predictions")]
    EmptyPrediction,

    #[error("{0}")]
    Inference(String),
}
