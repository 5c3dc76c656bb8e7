//! Static description of the prediction form and its HTML rendering.
//!
//! The browser page and the terminal client both build themselves from
//! [`FormDescription`]; the page posts every edit and click to `/predict`.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::{defaults, PLACEHOLDER_MESSAGE};
use crate::types::OwnerCount;

#[derive(Debug, Clone, Serialize)]
pub struct OptionSpec {
    pub label: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Number,
    Dropdown,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormDescription {
    pub title: &'static str,
    pub instructions: Vec<&'static str>,
    pub fields: Vec<FieldSpec>,
    pub button_label: &'static str,
    pub result_placeholder: &'static str,
}

pub fn form_description() -> FormDescription {
    FormDescription {
        title: "Car Price Prediction",
        instructions: vec![
            "In order to predict car price, you need to choose Year, Mileage, Kilometer Driven, and Number of previous owners",
            "If you don't know the values, default values can help you predict.",
        ],
        fields: vec![
            number_field("year", "Year", json!(defaults::YEAR)),
            number_field("mileage", "Mileage (kmpl)", json!(defaults::MILEAGE)),
            number_field("km_driven", "Kilometer Driven (km)", json!(defaults::KM_DRIVEN)),
            FieldSpec {
                id: "owner",
                label: "Number of Owners",
                kind: FieldKind::Dropdown,
                default: json!(defaults::OWNER),
                options: OwnerCount::ALL
                    .iter()
                    .map(|o| OptionSpec {
                        label: o.label(),
                        value: o.value(),
                    })
                    .collect(),
            },
        ],
        button_label: "predict",
        result_placeholder: PLACEHOLDER_MESSAGE,
    }
}

fn number_field(id: &'static str, label: &'static str, default: Value) -> FieldSpec {
    FieldSpec {
        id,
        label,
        kind: FieldKind::Number,
        default,
        options: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// HTML
// ---------------------------------------------------------------------------

const PAGE_STYLE: &str = r#"
body { max-width: 600px; margin: 0 auto; font-family: Arial, sans-serif; }
h1 { text-align: center; }
.field { margin-bottom: 15px; }
.field input, .field select { width: 100%; padding: 8px; box-sizing: border-box; }
#predict-button { width: 100%; padding: 10px; background-color: #007bff; color: white;
  border: none; border-radius: 5px; cursor: pointer; font-size: 16px; }
#result { margin-top: 20px; font-weight: bold; }
"#;

// Every input event and every click goes through evaluate(); the server
// decides whether n_clicks allows a prediction.
const PAGE_SCRIPT: &str = r#"
let nClicks = 0;
// Only the response to the latest request may touch the result region.
let latestRequest = 0;

function readNumber(id) {
  const raw = document.getElementById(id).value;
  if (raw === "") return null;
  const n = Number(raw);
  return Number.isFinite(n) ? n : null;
}

function readOwner() {
  const raw = document.getElementById("owner").value;
  return raw === "" ? null : parseInt(raw, 10);
}

async function evaluate() {
  const requestId = ++latestRequest;
  const body = {
    n_clicks: nClicks,
    year: readNumber("year"),
    mileage: readNumber("mileage"),
    km_driven: readNumber("km_driven"),
    owner: readOwner(),
  };
  const out = document.getElementById("result");
  let text;
  try {
    const res = await fetch("/predict", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify(body),
    });
    text = res.ok
      ? (await res.json()).result
      : "An error occurred: " + (await res.text());
  } catch (e) {
    text = "An error occurred: " + e;
  }
  if (requestId === latestRequest) {
    out.textContent = text;
  }
}

document.getElementById("predict-button").addEventListener("click", () => {
  nClicks += 1;
  evaluate();
});
for (const id of ["year", "mileage", "km_driven", "owner"]) {
  document.getElementById(id).addEventListener("input", evaluate);
}
"#;

pub fn render_html(form: &FormDescription) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape(form.title)));
    html.push_str(&format!("<style>{PAGE_STYLE}</style>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{}</h1>\n", escape(form.title)));

    html.push_str("<div style=\"margin-bottom: 20px\">\n<h2>Instruction</h2>\n");
    for line in &form.instructions {
        html.push_str(&format!("<p>{}</p>\n", escape(line)));
    }
    html.push_str("</div>\n");

    for field in &form.fields {
        html.push_str("<div class=\"field\">\n");
        html.push_str(&format!(
            "<label for=\"{id}\">{label}</label>\n",
            id = field.id,
            label = escape(field.label)
        ));
        match field.kind {
            FieldKind::Number => html.push_str(&format!(
                "<input id=\"{}\" type=\"number\" value=\"{}\">\n",
                field.id, field.default
            )),
            FieldKind::Dropdown => {
                html.push_str(&format!("<select id=\"{}\">\n", field.id));
                for opt in &field.options {
                    let selected = if field.default == json!(opt.value) {
                        " selected"
                    } else {
                        ""
                    };
                    html.push_str(&format!(
                        "<option value=\"{}\"{selected}>{}</option>\n",
                        opt.value,
                        escape(opt.label)
                    ));
                }
                html.push_str("</select>\n");
            }
        }
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        "<button id=\"predict-button\">{}</button>\n",
        escape(form.button_label)
    ));
    html.push_str(&format!(
        "<div id=\"result\">{}</div>\n",
        escape(form.result_placeholder)
    ));
    html.push_str(&format!("<script>{PAGE_SCRIPT}</script>\n</body>\n</html>\n"));
    html
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
