use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use validator::{Validate, ValidationError};

/// Cities offered by the form, in display order
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
pub enum City {
    Delhi,
    Mumbai,
    Bengaluru,
    Chennai,
    Hyderabad,
    Kolkata,
    Pune,
    Ahmedabad,
    Chandigarh,
    Jaipur,
    Lucknow,
    Indore,
    Nagpur,
    Kochi,
    Coimbatore,
    Bhubaneswar,
    Surat,
    Vadodara,
    Bhopal,
    Ludhiana,
    Kanpur,
    Patna,
    Agra,
    Amritsar,
    Varanasi,
    Guwahati,
    Raipur,
    Ranchi,
    Visakhapatnam,
    Mangalore,
    Patiala,
    Dehradun,
    Udaipur,
    Jodhpur,
    Guntur,
    Mysore,
    Rajkot,
    Madurai,
    Allahabad,
    Aurangabad,
    Jalandhar,
    Kolhapur,
    Trivandrum,
    Gwalior,
    Jamshedpur,
    Bareilly,
    Dhanbad,
    Siliguri,
}

impl City {
    /// All city names in display order
    pub fn names() -> Vec<&'static str> {
        City::iter().map(<&'static str>::from).collect()
    }
}

/// Occupations offered by the form, in display order
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    Display,
    IntoStaticStr,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Occupation {
    Retired,
    Freelancer,
    Student,
    GovernmentJob,
    BusinessOwner,
    Unemployed,
    PrivateJob,
}

impl Occupation {
    /// All occupation names in display order
    pub fn names() -> Vec<&'static str> {
        Occupation::iter().map(<&'static str>::from).collect()
    }
}

/// Values submitted through the prediction form
///
/// The range rules mirror the `min`/`max` attributes of the HTML inputs, so an
/// out-of-range value is rejected here before any feature record exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PredictionForm {
    /// Age in years
    #[validate(range(min = 1, max = 120))]
    pub age: u32,

    /// Weight in kilograms
    #[validate(range(min = 1.0, max = 300.0), custom(function = "finite"))]
    pub weight: f64,

    /// Height in meters
    #[validate(range(min = 0.5, max = 3.0), custom(function = "finite"))]
    pub height: f64,

    /// Annual income in lakhs per annum
    #[validate(range(min = 0.0, max = 1000.0), custom(function = "finite"))]
    pub income_lpa: f64,

    /// Whether the person smokes
    pub smoker: bool,

    pub city: City,

    pub occupation: Occupation,
}

/// Range rules never fire for NaN, so non-finite values are rejected separately
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            age: 30,
            weight: 70.0,
            height: 1.7,
            income_lpa: 5.0,
            smoker: true,
            city: City::Delhi,
            occupation: Occupation::Retired,
        }
    }
}

/// Choices and defaults the form is rendered with
#[derive(Debug, Clone, Serialize)]
pub struct FormOptions {
    pub cities: Vec<&'static str>,
    pub occupations: Vec<&'static str>,
    pub smoker: [bool; 2],
    pub defaults: PredictionForm,
}

impl FormOptions {
    pub fn new() -> Self {
        Self {
            cities: City::names(),
            occupations: Occupation::names(),
            smoker: [true, false],
            defaults: PredictionForm::default(),
        }
    }
}

impl Default for FormOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_option_counts() {
        assert_eq!(City::COUNT, 48);
        assert_eq!(Occupation::COUNT, 7);
        assert_eq!(City::names().len(), 48);
        assert_eq!(City::names()[0], "Delhi");
        assert_eq!(City::names()[47], "Siliguri");
    }

    #[test]
    fn test_occupation_names_are_snake_case() {
        assert_eq!(
            Occupation::names(),
            vec![
                "retired",
                "freelancer",
                "student",
                "government_job",
                "business_owner",
                "unemployed",
                "private_job"
            ]
        );
        assert_eq!(
            Occupation::from_str("government_job").unwrap(),
            Occupation::GovernmentJob
        );
    }

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&Occupation::BusinessOwner).unwrap();
        assert_eq!(json, "\"business_owner\"");
        assert_eq!(Occupation::BusinessOwner.to_string(), "business_owner");

        let city: City = serde_json::from_str("\"Visakhapatnam\"").unwrap();
        assert_eq!(city, City::Visakhapatnam);
        assert!(serde_json::from_str::<City>("\"Atlantis\"").is_err());
    }

    #[test]
    fn test_default_form_is_valid() {
        let form = PredictionForm::default();
        assert!(form.validate().is_ok());
        assert_eq!(form.age, 30);
        assert!(form.smoker);
        assert_eq!(form.city, City::Delhi);
    }

    #[test]
    fn test_out_of_range_age_is_rejected() {
        for age in [0, 121] {
            let form = PredictionForm {
                age,
                ..Default::default()
            };
            assert!(form.validate().is_err(), "age {} should be rejected", age);
        }

        for age in [1, 120] {
            let form = PredictionForm {
                age,
                ..Default::default()
            };
            assert!(form.validate().is_ok(), "age {} should be accepted", age);
        }
    }

    #[test]
    fn test_out_of_range_measurements_are_rejected() {
        let heavy = PredictionForm {
            weight: 300.5,
            ..Default::default()
        };
        assert!(heavy.validate().is_err());

        let short = PredictionForm {
            height: 0.4,
            ..Default::default()
        };
        assert!(short.validate().is_err());

        let negative_income = PredictionForm {
            income_lpa: -1.0,
            ..Default::default()
        };
        assert!(negative_income.validate().is_err());
    }

    #[test]
    fn test_non_finite_measurements_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let forms = [
                PredictionForm {
                    weight: value,
                    ..Default::default()
                },
                PredictionForm {
                    height: value,
                    ..Default::default()
                },
                PredictionForm {
                    income_lpa: value,
                    ..Default::default()
                },
            ];
            for form in forms {
                let errors = form.validate().unwrap_err();
                assert_eq!(errors.field_errors().len(), 1, "{:?}", form);
            }
        }
    }
}
