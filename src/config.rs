use crate::error::{AppError, Result};
use crate::types::PriceTarget;

pub const MODEL_PATH: &str = "models/selling_price.json";
pub const API_PORT: u16 = 8050;
pub const BIND_HOST: &str = "0.0.0.0";

/// Column order the regressor was fitted with. The request row is always built in this order.
pub const FEATURE_COLUMNS: [&str; 4] = ["year", "mileage", "km_driven", "owner"];

pub const CURRENCY: &str = "Baht";

/// Result region text before the predict button has been clicked.
pub const PLACEHOLDER_MESSAGE: &str = "Click the predict button to see the result.";
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields before predicting.";

/// Field defaults shown when the form first loads.
pub mod defaults {
    pub const YEAR: i64 = 2023;
    pub const MILEAGE: f64 = 20.0;
    pub const KM_DRIVEN: f64 = 14000.0;
    pub const OWNER: u8 = 1;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: String,
    pub bind_host: String,
    pub api_port: u16,
    pub log_level: String,
    /// Overrides the target transform recorded in the artifact (PRICE_TARGET).
    pub price_target: Option<PriceTarget>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let price_target = match var("PRICE_TARGET").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse::<PriceTarget>().map_err(|_| {
                AppError::Config(format!(
                    "PRICE_TARGET must be 'log_price' or 'price', got '{raw}'"
                ))
            })?),
            None => None,
        };

        Ok(Self {
            model_path: var("MODEL_PATH").unwrap_or_else(|| MODEL_PATH.to_string()),
            bind_host: var("BIND_HOST").unwrap_or_else(|| BIND_HOST.to_string()),
            api_port: var("API_PORT")
                .unwrap_or_else(|| API_PORT.to_string())
                .parse::<u16>()
                .map_err(|_| AppError::Config("API_PORT must be a valid port number".to_string()))?,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            price_target,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_host, self.api_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config_with(&[]).unwrap();
        assert_eq!(cfg.model_path, MODEL_PATH);
        assert_eq!(cfg.api_port, 8050);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.price_target, None);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8050");
    }

    #[test]
    fn invalid_port_is_config_error() {
        let err = config_with(&[("API_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)), "got {err:?}");
    }

    #[test]
    fn price_target_override_parses() {
        let cfg = config_with(&[("PRICE_TARGET", "price")]).unwrap();
        assert_eq!(cfg.price_target, Some(PriceTarget::Price));

        let cfg = config_with(&[("PRICE_TARGET", " log_price ")]).unwrap();
        assert_eq!(cfg.price_target, Some(PriceTarget::LogPrice));
    }

    #[test]
    fn unknown_price_target_is_rejected() {
        let err = config_with(&[("PRICE_TARGET", "sqrt")]).unwrap_err();
        assert!(err.to_string().contains("PRICE_TARGET"), "got {err}");
    }
}
