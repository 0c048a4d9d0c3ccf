use crate::models::PredictionForm;
use serde::Serialize;

/// Feature names in the order the classifier receives them
pub const FEATURE_NAMES: [&str; 7] = [
    "age",
    "weight",
    "height",
    "income_lpa",
    "smoker",
    "city",
    "occupation",
];

/// Single-row input for one prediction call
///
/// Built fresh from the form on every submission and dropped once the
/// classifier has answered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub age: u32,
    pub weight: f64,
    pub height: f64,
    pub income_lpa: f64,
    /// 1 for smokers, 0 otherwise
    pub smoker: u8,
    pub city: String,
    pub occupation: String,
}

impl FeatureRecord {
    /// Assemble a record from validated form values
    pub fn assemble(form: &PredictionForm) -> Self {
        Self {
            age: form.age,
            weight: form.weight,
            height: form.height,
            income_lpa: form.income_lpa,
            smoker: u8::from(form.smoker),
            city: form.city.to_string(),
            occupation: form.occupation.to_string(),
        }
    }

    /// Named values in [`FEATURE_NAMES`] order
    pub fn fields(&self) -> [(&'static str, FeatureValue<'_>); 7] {
        [
            (FEATURE_NAMES[0], FeatureValue::Integer(i64::from(self.age))),
            (FEATURE_NAMES[1], FeatureValue::Real(self.weight)),
            (FEATURE_NAMES[2], FeatureValue::Real(self.height)),
            (FEATURE_NAMES[3], FeatureValue::Real(self.income_lpa)),
            (FEATURE_NAMES[4], FeatureValue::Integer(i64::from(self.smoker))),
            (FEATURE_NAMES[5], FeatureValue::Text(&self.city)),
            (FEATURE_NAMES[6], FeatureValue::Text(&self.occupation)),
        ]
    }
}

/// A single cell of a feature record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureValue<'a> {
    Integer(i64),
    Real(f64),
    Text(&'a str),
}
