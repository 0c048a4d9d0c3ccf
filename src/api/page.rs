//! Server-rendered HTML for the prediction form

use crate::models::{City, Occupation, PredictionForm};
use crate::prediction::PredictionOutcome;
use std::fmt::Write;
use strum::IntoEnumIterator;

pub const PAGE_TITLE: &str = "InsureMate";
pub const HEADING: &str = "Health Insurance Premium Prediction";
pub const INTRO: &str = "Enter the details below to predict your health insurance premium category:";
pub const SUBMIT_LABEL: &str = "Predict Premium Category";

/// Everything one render of the page depends on
#[derive(Debug, Clone)]
pub struct PageView {
    pub form: PredictionForm,
    pub load_error: Option<String>,
    pub outcome: Option<PredictionOutcome>,
}

impl PageView {
    pub fn new(form: PredictionForm) -> Self {
        Self {
            form,
            load_error: None,
            outcome: None,
        }
    }

    pub fn with_load_error(mut self, load_error: Option<String>) -> Self {
        self.load_error = load_error;
        self
    }

    pub fn with_outcome(mut self, outcome: PredictionOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }
}

/// Render the full page
pub fn render(view: &PageView) -> String {
    let form = &view.form;
    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", PAGE_TITLE);
    html.push_str("</head>\n<body>\n<main>\n");
    let _ = writeln!(html, "<h1>{}</h1>", HEADING);
    let _ = writeln!(html, "<p>{}</p>", INTRO);

    if let Some(error) = &view.load_error {
        let _ = writeln!(html, "<div class=\"error\" role=\"alert\">{}</div>", escape(error));
    }

    html.push_str("<form method=\"post\" action=\"/predict\">\n");
    number_input(&mut html, "age", "Age", "1", "120", "1", &form.age.to_string());
    number_input(&mut html, "weight", "Weight (kg)", "1.0", "300.0", "any", &form.weight.to_string());
    number_input(&mut html, "height", "Height (m)", "0.5", "3.0", "any", &form.height.to_string());
    number_input(
        &mut html,
        "income_lpa",
        "Annual Income (LPA)",
        "0.0",
        "1000.0",
        "any",
        &form.income_lpa.to_string(),
    );

    let smoker_options = [(true, "True"), (false, "False")]
        .map(|(value, label)| (value.to_string(), label.to_string(), value == form.smoker));
    select(&mut html, "smoker", "Are you a Smoker?", &smoker_options);

    let city_options: Vec<_> = City::iter()
        .map(|city| (city.to_string(), city.to_string(), city == form.city))
        .collect();
    select(&mut html, "city", "City", &city_options);

    let occupation_options: Vec<_> = Occupation::iter()
        .map(|occupation| {
            (
                occupation.to_string(),
                occupation.to_string(),
                occupation == form.occupation,
            )
        })
        .collect();
    select(&mut html, "occupation", "Occupation", &occupation_options);

    let _ = writeln!(html, "<button type=\"submit\">{}</button>", SUBMIT_LABEL);
    html.push_str("</form>\n");

    if let Some(outcome) = &view.outcome {
        render_outcome(&mut html, outcome);
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

fn render_outcome(html: &mut String, outcome: &PredictionOutcome) {
    let class = if outcome.is_success() { "success" } else { "error" };
    let _ = writeln!(
        html,
        "<div class=\"{}\" role=\"status\">{}</div>",
        class,
        escape(&outcome.message())
    );

    if !outcome.hints().is_empty() {
        html.push_str("<h3>Troubleshooting:</h3>\n");
        for hint in outcome.hints() {
            let _ = writeln!(html, "<div class=\"info\">{}</div>", escape(hint));
        }
    }
}

fn number_input(
    html: &mut String,
    name: &str,
    label: &str,
    min: &str,
    max: &str,
    step: &str,
    value: &str,
) {
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\n<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\" max=\"{max}\" step=\"{step}\" value=\"{value}\" required>",
        name = name,
        label = escape(label),
        min = min,
        max = max,
        step = step,
        value = escape(value),
    );
}

fn select(html: &mut String, name: &str, label: &str, options: &[(String, String, bool)]) {
    let _ = writeln!(
        html,
        "<label for=\"{name}\">{label}</label>\n<select id=\"{name}\" name=\"{name}\">",
        name = name,
        label = escape(label),
    );
    for (value, text, selected) in options {
        let _ = writeln!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(value),
            if *selected { " selected" } else { "" },
            escape(text)
        );
    }
    html.push_str("</select>\n");
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::Category;

    #[test]
    fn test_default_page_lists_all_options() {
        let html = render(&PageView::new(PredictionForm::default()));

        assert!(html.contains(HEADING));
        assert!(html.contains(SUBMIT_LABEL));
        assert_eq!(html.matches("<option").count(), 2 + 48 + 7);
        assert!(html.contains("<option value=\"Delhi\" selected>Delhi</option>"));
        assert!(html.contains("<option value=\"true\" selected>True</option>"));
        assert!(html.contains("min=\"1\" max=\"120\""));
        assert!(html.contains("value=\"30\""));
    }

    #[test]
    fn test_load_error_banner() {
        let html = render(
            &PageView::new(PredictionForm::default())
                .with_load_error(Some("Error loading model: bad <magic>".to_string())),
        );

        assert!(html.contains("Error loading model: bad &lt;magic&gt;"));
    }

    #[test]
    fn test_success_outcome() {
        let view = PageView::new(PredictionForm::default()).with_outcome(
            PredictionOutcome::Success {
                category: Category::new("Medium"),
            },
        );

        let html = render(&view);

        assert!(html.contains("Predicted Premium Category: Medium"));
        assert!(!html.contains("Troubleshooting:"));
    }

    #[test]
    fn test_failure_outcome_with_hints() {
        let view = PageView::new(PredictionForm::default()).with_outcome(
            PredictionOutcome::Failure {
                code: "PREDICTION_TYPE_ERROR".to_string(),
                message: "Prediction Error: could not convert string to float: 'Delhi'".to_string(),
                hints: vec!["first hint".to_string(), "second hint".to_string()],
            },
        );

        let html = render(&view);

        assert!(html.contains("could not convert string to float: &#39;Delhi&#39;"));
        assert!(html.contains("Troubleshooting:"));
        assert!(html.contains("<div class=\"info\">second hint</div>"));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a & \"b\""), "a &amp; &quot;b&quot;");
    }
}
