use crate::config::defaults;
use crate::predictor::PredictionService;
use crate::types::{FeatureRow, OwnerCount, ResultView};

/// Field values plus the predict-button click counter.
///
/// Every edit and every click re-runs [`FormController::evaluate`]; the click gate lives
/// inside it, so edits before the first click keep showing the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct FormController {
    fields: FeatureRow,
    n_clicks: u32,
}

impl Default for FormController {
    fn default() -> Self {
        Self::new()
    }
}

impl FormController {
    /// Form as first rendered: default values, never clicked.
    pub fn new() -> Self {
        Self {
            fields: FeatureRow {
                year: Some(defaults::YEAR),
                mileage: Some(defaults::MILEAGE),
                km_driven: Some(defaults::KM_DRIVEN),
                owner: OwnerCount::try_from(defaults::OWNER).ok(),
            },
            n_clicks: 0,
        }
    }

    pub fn is_activated(&self) -> bool {
        self.n_clicks > 0
    }

    pub fn set_year(&mut self, year: Option<i64>) {
        self.fields.year = year;
    }

    pub fn set_mileage(&mut self, mileage: Option<f64>) {
        self.fields.mileage = mileage;
    }

    pub fn set_km_driven(&mut self, km_driven: Option<f64>) {
        self.fields.km_driven = km_driven;
    }

    pub fn set_owner(&mut self, owner: Option<OwnerCount>) {
        self.fields.owner = owner;
    }

    /// Click count as tracked by the client's predict button.
    pub fn set_clicks(&mut self, n_clicks: u32) {
        self.n_clicks = n_clicks;
    }

    pub fn evaluate(&self, service: &PredictionService) -> ResultView {
        if !self.is_activated() {
            return ResultView::Placeholder;
        }
        ResultView::Prediction(service.predict(&self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FEATURE_COLUMNS;
    use crate::model::{LinearRegressor, ModelArtifact, StandardScaler};
    use crate::types::{PredictionResult, PriceTarget};
    use std::sync::Arc;

    fn service() -> PredictionService {
        let artifact = ModelArtifact::new(
            Box::new(LinearRegressor {
                coefficients: vec![0.5, 0.05, -0.08, -0.04],
                intercept: 13.0,
            }),
            Box::new(StandardScaler {
                mean: vec![2014.0, 19.4, 70000.0, 1.4],
                scale: vec![4.0, 4.0, 57000.0, 0.7],
            }),
            FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            PriceTarget::LogPrice,
        );
        PredictionService::new(Arc::new(artifact), None)
    }

    #[test]
    fn starts_with_defaults_and_placeholder() {
        let svc = service();
        let mut form = FormController::new();
        assert!(!form.is_activated());
        assert_eq!(
            form.evaluate(&svc).to_string(),
            "Click the predict button to see the result."
        );

        let defaults = FeatureRow {
            year: Some(2023),
            mileage: Some(20.0),
            km_driven: Some(14000.0),
            owner: Some(OwnerCount::First),
        };
        form.set_clicks(1);
        assert_eq!(
            form.evaluate(&svc),
            ResultView::Prediction(svc.predict(&defaults))
        );
    }

    #[test]
    fn edits_before_first_click_keep_placeholder() {
        let svc = service();
        let mut form = FormController::new();
        form.set_year(None);
        assert_eq!(form.evaluate(&svc), ResultView::Placeholder);
        form.set_owner(Some(OwnerCount::Fourth));
        assert_eq!(form.evaluate(&svc), ResultView::Placeholder);
        assert!(!form.is_activated());
    }

    #[test]
    fn first_click_produces_price() {
        let svc = service();
        let mut form = FormController::new();
        form.set_clicks(1);
        let view = form.evaluate(&svc);
        assert_eq!(view.status(), "price");
        assert!(view.to_string().starts_with("The predicted car price is ≈ "));
    }

    #[test]
    fn edits_after_click_re_evaluate() {
        let svc = service();
        let mut form = FormController::new();
        form.set_clicks(1);
        let before = form.evaluate(&svc);

        form.set_km_driven(Some(150000.0));
        let after = form.evaluate(&svc);
        assert_ne!(before, after);

        form.set_mileage(None);
        assert_eq!(
            form.evaluate(&svc),
            ResultView::Prediction(PredictionResult::MissingFields)
        );
    }
}
