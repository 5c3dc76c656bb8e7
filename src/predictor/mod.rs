pub mod format;
pub mod service;

pub use service::PredictionService;
