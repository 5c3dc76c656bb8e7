use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// API shapes (mirror routes.rs / form/page.rs)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OptionSpec {
    pub label: String,
    pub value: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub label: String,
    pub kind: String,
    pub default: serde_json::Value,
    #[serde(default)]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FormDescription {
    pub title: String,
    pub instructions: Vec<String>,
    pub fields: Vec<FieldSpec>,
    pub button_label: String,
    pub result_placeholder: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PredictRequest {
    pub n_clicks: u32,
    pub year: Option<i64>,
    pub mileage: Option<f64>,
    pub km_driven: Option<f64>,
    pub owner: Option<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[allow(dead_code)]
pub struct PredictResponse {
    pub status: String,
    pub result: String,
    pub price: Option<f64>,
}

// ---------------------------------------------------------------------------
// Form state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionStatus {
    Connected,
    Error(String),
    Connecting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Year,
    Mileage,
    KmDriven,
    Owner,
    Predict,
}

impl Focus {
    pub const ORDER: [Focus; 5] = [
        Focus::Year,
        Focus::Mileage,
        Focus::KmDriven,
        Focus::Owner,
        Focus::Predict,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub status: ConnectionStatus,
    pub title: String,
    pub instructions: Vec<String>,
    pub labels: [String; 4],
    pub button_label: String,
    /// Raw text of the numeric fields; empty means the field is cleared.
    pub year: String,
    pub mileage: String,
    pub km_driven: String,
    /// (label, value) pairs of the owner dropdown.
    pub owner_options: Vec<(String, u8)>,
    /// Index into `owner_options`; None when cleared.
    pub owner: Option<usize>,
    pub focus: Focus,
    pub n_clicks: u32,
    pub result: String,
    pub base_url: String,
}

impl AppState {
    pub fn new(base_url: String) -> Self {
        Self {
            status: ConnectionStatus::Connecting,
            title: "Car Price Prediction".to_string(),
            instructions: Vec::new(),
            labels: [
                "Year".to_string(),
                "Mileage (kmpl)".to_string(),
                "Kilometer Driven (km)".to_string(),
                "Number of Owners".to_string(),
            ],
            button_label: "predict".to_string(),
            year: String::new(),
            mileage: String::new(),
            km_driven: String::new(),
            owner_options: Vec::new(),
            owner: None,
            focus: Focus::Year,
            n_clicks: 0,
            result: "Click the predict button to see the result.".to_string(),
            base_url,
        }
    }

    /// Apply the server's form description: labels, defaults, owner options.
    pub fn apply_form(&mut self, form: FormDescription) {
        self.title = form.title;
        self.instructions = form.instructions;
        self.button_label = form.button_label;
        self.result = form.result_placeholder;

        for field in form.fields {
            let default = match &field.default {
                serde_json::Value::Number(n) => n.to_string(),
                _ => String::new(),
            };
            match field.id.as_str() {
                "year" => {
                    self.labels[0] = field.label;
                    self.year = default;
                }
                "mileage" => {
                    self.labels[1] = field.label;
                    self.mileage = default;
                }
                "km_driven" => {
                    self.labels[2] = field.label;
                    self.km_driven = default;
                }
                "owner" if field.kind == "dropdown" => {
                    self.labels[3] = field.label;
                    self.owner_options = field
                        .options
                        .into_iter()
                        .map(|o| (o.label, o.value))
                        .collect();
                    let wanted = field.default.as_u64();
                    self.owner = self
                        .owner_options
                        .iter()
                        .position(|(_, v)| Some(u64::from(*v)) == wanted);
                }
                _ => {}
            }
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Year => Some(&mut self.year),
            Focus::Mileage => Some(&mut self.mileage),
            Focus::KmDriven => Some(&mut self.km_driven),
            Focus::Owner | Focus::Predict => None,
        }
    }

    /// Type into the focused numeric field. Returns true if a value changed.
    pub fn input_char(&mut self, c: char) -> bool {
        let allow_dot = self.focus != Focus::Year;
        let Some(buf) = self.focused_buffer() else {
            return false;
        };
        let accepted = c.is_ascii_digit()
            || (c == '.' && allow_dot && !buf.contains('.'))
            || (c == '-' && buf.is_empty());
        if accepted {
            buf.push(c);
        }
        accepted
    }

    /// Backspace on a numeric field, or clear the owner dropdown.
    pub fn backspace(&mut self) -> bool {
        if self.focus == Focus::Owner {
            return self.owner.take().is_some();
        }
        match self.focused_buffer() {
            Some(buf) => buf.pop().is_some(),
            None => false,
        }
    }

    /// Move the owner selection by `step`, wrapping. Selects the first option when cleared.
    pub fn cycle_owner(&mut self, step: isize) -> bool {
        if self.focus != Focus::Owner || self.owner_options.is_empty() {
            return false;
        }
        let n = self.owner_options.len() as isize;
        self.owner = Some(match self.owner {
            Some(i) => (i as isize + step).rem_euclid(n) as usize,
            None => 0,
        });
        true
    }

    pub fn click(&mut self) {
        self.n_clicks = self.n_clicks.saturating_add(1);
    }

    pub fn owner_label(&self) -> Option<&str> {
        self.owner
            .and_then(|i| self.owner_options.get(i))
            .map(|(label, _)| label.as_str())
    }

    /// Current field values; unparsable text counts as an absent value.
    pub fn snapshot(&self) -> PredictRequest {
        PredictRequest {
            n_clicks: self.n_clicks,
            year: self.year.parse().ok(),
            mileage: self.mileage.parse().ok(),
            km_driven: self.km_driven.parse().ok(),
            owner: self
                .owner
                .and_then(|i| self.owner_options.get(i))
                .map(|(_, v)| *v),
        }
    }

    pub async fn load_form(&mut self, client: &reqwest::Client) {
        let url = format!("{}/form", self.base_url);
        match client.get(&url).send().await {
            Ok(resp) => match resp.json::<FormDescription>().await {
                Ok(form) => {
                    self.apply_form(form);
                    self.status = ConnectionStatus::Connected;
                }
                Err(e) => self.status = ConnectionStatus::Error(format!("parse error: {e}")),
            },
            Err(e) => self.status = ConnectionStatus::Error(format!("{e}")),
        }
    }

    /// Send the snapshot to /predict and show whatever comes back.
    pub async fn evaluate(&mut self, client: &reqwest::Client) {
        let url = format!("{}/predict", self.base_url);
        let res = client.post(&url).json(&self.snapshot()).send().await;
        match res {
            Ok(resp) if resp.status().is_success() => match resp.json::<PredictResponse>().await {
                Ok(body) => {
                    self.result = body.result;
                    self.status = ConnectionStatus::Connected;
                }
                Err(e) => self.status = ConnectionStatus::Error(format!("parse error: {e}")),
            },
            Ok(resp) => {
                let code = resp.status();
                let text = resp.text().await.unwrap_or_default();
                self.result = format!("An error occurred: {text}");
                self.status = ConnectionStatus::Error(format!("HTTP {code}"));
            }
            Err(e) => self.status = ConnectionStatus::Error(format!("{e}")),
        }
    }
}

fn main() {
    // Terminal form entry point lives in src/bin/tui.rs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_json() -> FormDescription {
        serde_json::from_str(
            r#"{
                "title": "Car Price Prediction",
                "instructions": ["a", "b"],
                "fields": [
                    {"id": "year", "label": "Year", "kind": "number", "default": 2023},
                    {"id": "mileage", "label": "Mileage (kmpl)", "kind": "number", "default": 20.0},
                    {"id": "km_driven", "label": "Kilometer Driven (km)", "kind": "number", "default": 14000.0},
                    {"id": "owner", "label": "Number of Owners", "kind": "dropdown", "default": 1,
                     "options": [
                        {"label": "First Owner", "value": 1},
                        {"label": "Second Owner", "value": 2},
                        {"label": "Third Owner", "value": 3},
                        {"label": "Fourth Owner", "value": 4}
                     ]}
                ],
                "button_label": "predict",
                "result_placeholder": "Click the predict button to see the result."
            }"#,
        )
        .unwrap()
    }

    fn loaded() -> AppState {
        let mut app = AppState::new("http://localhost:8050".to_string());
        app.apply_form(form_json());
        app
    }

    #[test]
    fn defaults_from_form_description() {
        let app = loaded();
        let snap = app.snapshot();
        assert_eq!(
            snap,
            PredictRequest {
                n_clicks: 0,
                year: Some(2023),
                mileage: Some(20.0),
                km_driven: Some(14000.0),
                owner: Some(1),
            }
        );
        assert_eq!(app.owner_label(), Some("First Owner"));
    }

    #[test]
    fn clearing_a_field_makes_it_absent() {
        let mut app = loaded();
        app.focus = Focus::Year;
        while app.backspace() {}
        assert_eq!(app.year, "");
        assert_eq!(app.snapshot().year, None);
    }

    #[test]
    fn year_rejects_decimal_point() {
        let mut app = loaded();
        app.focus = Focus::Year;
        assert!(!app.input_char('.'));
        app.focus = Focus::Mileage;
        assert!(!app.input_char('.'), "mileage already holds a decimal point");
        app.mileage.clear();
        assert!(app.input_char('1'));
        assert!(app.input_char('.'));
        assert!(app.input_char('5'));
        assert_eq!(app.snapshot().mileage, Some(1.5));
    }

    #[test]
    fn owner_cycles_within_four_values() {
        let mut app = loaded();
        app.focus = Focus::Owner;
        app.cycle_owner(-1);
        assert_eq!(app.snapshot().owner, Some(4));
        app.cycle_owner(1);
        app.cycle_owner(1);
        assert_eq!(app.snapshot().owner, Some(2));
        assert!(app.backspace());
        assert_eq!(app.snapshot().owner, None);
        app.cycle_owner(1);
        assert_eq!(app.snapshot().owner, Some(1));
    }

    #[test]
    fn focus_wraps() {
        assert_eq!(Focus::Predict.next(), Focus::Year);
        assert_eq!(Focus::Year.prev(), Focus::Predict);
        assert_eq!(Focus::KmDriven.next(), Focus::Owner);
    }

    #[test]
    fn click_increments_counter() {
        let mut app = loaded();
        app.click();
        app.click();
        assert_eq!(app.snapshot().n_clicks, 2);
    }
}
