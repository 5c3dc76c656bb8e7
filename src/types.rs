use serde::{Deserialize, Serialize};

use crate::config::{CURRENCY, MISSING_FIELDS_MESSAGE, PLACEHOLDER_MESSAGE};
use crate::predictor::format::format_price;

// ---------------------------------------------------------------------------
// Owner count
// ---------------------------------------------------------------------------

/// Number of previous owners. Only the four dropdown values exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OwnerCount {
    First,
    Second,
    Third,
    Fourth,
}

impl OwnerCount {
    pub const ALL: [OwnerCount; 4] = [
        OwnerCount::First,
        OwnerCount::Second,
        OwnerCount::Third,
        OwnerCount::Fourth,
    ];

    pub fn value(self) -> u8 {
        match self {
            OwnerCount::First => 1,
            OwnerCount::Second => 2,
            OwnerCount::Third => 3,
            OwnerCount::Fourth => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OwnerCount::First => "First Owner",
            OwnerCount::Second => "Second Owner",
            OwnerCount::Third => "Third Owner",
            OwnerCount::Fourth => "Fourth Owner",
        }
    }
}

impl TryFrom<u8> for OwnerCount {
    type Error = String;

    fn try_from(v: u8) -> std::result::Result<Self, Self::Error> {
        match v {
            1 => Ok(OwnerCount::First),
            2 => Ok(OwnerCount::Second),
            3 => Ok(OwnerCount::Third),
            4 => Ok(OwnerCount::Fourth),
            other => Err(format!("owner must be one of 1, 2, 3, 4 (got {other})")),
        }
    }
}

impl From<OwnerCount> for u8 {
    fn from(o: OwnerCount) -> u8 {
        o.value()
    }
}

impl std::fmt::Display for OwnerCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Feature rows
// ---------------------------------------------------------------------------

/// Current field values as submitted by the form. Any of them may be cleared.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureRow {
    pub year: Option<i64>,
    /// km per liter
    pub mileage: Option<f64>,
    pub km_driven: Option<f64>,
    pub owner: Option<OwnerCount>,
}

impl FeatureRow {
    /// All four values, or None if any field is empty.
    pub fn complete(&self) -> Option<CompleteFeatureRow> {
        Some(CompleteFeatureRow {
            year: self.year?,
            mileage: self.mileage?,
            km_driven: self.km_driven?,
            owner: self.owner?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompleteFeatureRow {
    pub year: i64,
    pub mileage: f64,
    pub km_driven: f64,
    pub owner: OwnerCount,
}

impl CompleteFeatureRow {
    /// Values in `FEATURE_COLUMNS` order.
    pub fn values(&self) -> [f64; 4] {
        [
            self.year as f64,
            self.mileage,
            self.km_driven,
            f64::from(self.owner.value()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Target transform
// ---------------------------------------------------------------------------

/// What the regressor was trained to predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTarget {
    /// ln(price); outputs are exponentiated.
    #[default]
    LogPrice,
    /// Price itself; outputs are used as-is.
    Price,
}

impl std::str::FromStr for PriceTarget {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "log_price" => Ok(PriceTarget::LogPrice),
            "price" => Ok(PriceTarget::Price),
            other => Err(format!("unknown price target '{other}'")),
        }
    }
}

impl std::fmt::Display for PriceTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceTarget::LogPrice => write!(f, "log_price"),
            PriceTarget::Price => write!(f, "price"),
        }
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Price(f64),
    MissingFields,
    /// Description of whatever went wrong building, scaling, or scoring the row.
    Failed(String),
}

impl PredictionResult {
    pub fn status(&self) -> &'static str {
        match self {
            PredictionResult::Price(_) => "price",
            PredictionResult::MissingFields => "missing_fields",
            PredictionResult::Failed(_) => "error",
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            PredictionResult::Price(p) => Some(*p),
            _ => None,
        }
    }
}

impl std::fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictionResult::Price(p) => write!(
                f,
                "The predicted car price is ≈ {} {CURRENCY}",
                format_price(*p)
            ),
            PredictionResult::MissingFields => write!(f, "{MISSING_FIELDS_MESSAGE}"),
            PredictionResult::Failed(e) => write!(f, "An error occurred: {e}"),
        }
    }
}

/// Content of the result region.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Placeholder,
    Prediction(PredictionResult),
}

impl ResultView {
    pub fn status(&self) -> &'static str {
        match self {
            ResultView::Placeholder => "pending",
            ResultView::Prediction(p) => p.status(),
        }
    }
}

impl std::fmt::Display for ResultView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultView::Placeholder => write!(f, "{PLACEHOLDER_MESSAGE}"),
            ResultView::Prediction(p) => write!(f, "{p}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row() -> FeatureRow {
        FeatureRow {
            year: Some(2023),
            mileage: Some(20.0),
            km_driven: Some(14000.0),
            owner: Some(OwnerCount::First),
        }
    }

    #[test]
    fn owner_accepts_only_four_values() {
        for v in 1..=4u8 {
            let owner = OwnerCount::try_from(v).unwrap();
            assert_eq!(owner.value(), v);
        }
        assert!(OwnerCount::try_from(0u8).is_err());
        assert!(OwnerCount::try_from(5u8).is_err());
    }

    #[test]
    fn owner_rejects_out_of_range_json() {
        let bad: std::result::Result<FeatureRow, _> = serde_json::from_str(r#"{"owner": 7}"#);
        assert!(bad.is_err());
        let good: FeatureRow = serde_json::from_str(r#"{"owner": 3}"#).unwrap();
        assert_eq!(good.owner, Some(OwnerCount::Third));
    }

    #[test]
    fn missing_keys_deserialize_as_absent() {
        let row: FeatureRow = serde_json::from_str(r#"{"year": 2019, "mileage": null}"#).unwrap();
        assert_eq!(row.year, Some(2019));
        assert_eq!(row.mileage, None);
        assert!(row.complete().is_none());
    }

    #[test]
    fn complete_row_keeps_column_order() {
        let row = full_row().complete().unwrap();
        assert_eq!(row.values(), [2023.0, 20.0, 14000.0, 1.0]);
    }

    #[test]
    fn any_absent_field_makes_row_incomplete() {
        let mut r = full_row();
        r.year = None;
        assert!(r.complete().is_none());
        let mut r = full_row();
        r.mileage = None;
        assert!(r.complete().is_none());
        let mut r = full_row();
        r.km_driven = None;
        assert!(r.complete().is_none());
        let mut r = full_row();
        r.owner = None;
        assert!(r.complete().is_none());
    }

    #[test]
    fn result_messages() {
        assert_eq!(
            PredictionResult::Price(1234567.891).to_string(),
            "The predicted car price is ≈ 1,234,567.89 Baht"
        );
        assert_eq!(
            PredictionResult::MissingFields.to_string(),
            "Please fill in all fields before predicting."
        );
        assert_eq!(
            PredictionResult::Failed("boom".into()).to_string(),
            "An error occurred: boom"
        );
        assert_eq!(
            ResultView::Placeholder.to_string(),
            "Click the predict button to see the result."
        );
    }
}
