//! Shared fixtures: small smartcore models wrapped in artifact envelopes
//!
//! Training rows are (age, weight, height, income_lpa, smoker, city code,
//! occupation code). Labels: 0 "Low" for non-smokers under 40, 2 "High" for
//! smokers over 50, 1 "Medium" for everyone else.

#![allow(dead_code)]

use insuremate::ml::artifact::{DecisionTreeModel, LogisticRegressionModel};
use insuremate::ml::{ArtifactMetadata, Estimator, ModelArtifact};
use insuremate::models::{City, Occupation, PredictionForm, FEATURE_NAMES};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegressionParameters;
use smartcore::tree::decision_tree_classifier::DecisionTreeClassifierParameters;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;

fn training_data() -> (DenseMatrix<f64>, Vec<i32>) {
    let mut rows = Vec::new();
    let mut labels = Vec::new();

    for age in (20..80).step_by(5) {
        for smoker in [0, 1] {
            rows.push(vec![age as f64, 70.0, 1.7, 10.0, smoker as f64, 0.0, 2.0]);
            labels.push(match (age, smoker) {
                (a, 1) if a > 50 => 2,
                (a, 0) if a < 40 => 0,
                _ => 1,
            });
        }
    }

    let n_rows = rows.len();
    let data: Vec<f64> = rows.into_iter().flatten().collect();
    (DenseMatrix::new(n_rows, FEATURE_NAMES.len(), data, false), labels)
}

pub fn decision_tree() -> Estimator {
    let (x, y) = training_data();
    let model = DecisionTreeModel::fit(&x, &y, DecisionTreeClassifierParameters::default())
        .expect("fixture tree should fit");
    Estimator::DecisionTree(model)
}

pub fn logistic_regression() -> Estimator {
    let (x, y) = training_data();
    let model = LogisticRegressionModel::fit(&x, &y, LogisticRegressionParameters::default())
        .expect("fixture regression should fit");
    Estimator::LogisticRegression(model)
}

/// Index-based codes for every city and occupation
pub fn label_encodings() -> HashMap<String, HashMap<String, f64>> {
    let cities = City::iter()
        .enumerate()
        .map(|(idx, city)| (city.to_string(), idx as f64))
        .collect();
    let occupations = Occupation::iter()
        .enumerate()
        .map(|(idx, occupation)| (occupation.to_string(), idx as f64))
        .collect();

    HashMap::from([
        ("city".to_string(), cities),
        ("occupation".to_string(), occupations),
    ])
}

pub fn artifact(estimator: Estimator, encoded: bool) -> ModelArtifact {
    ModelArtifact {
        metadata: ArtifactMetadata::new("premium-fixture", "1.0")
            .with_classes(["Low", "Medium", "High"])
            .with_trained_at(chrono::Utc::now()),
        feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
        categorical_encodings: if encoded {
            label_encodings()
        } else {
            HashMap::new()
        },
        estimator,
    }
}

pub fn write_json(dir: &Path, artifact: &ModelArtifact) -> PathBuf {
    let path = dir.join("model.json");
    std::fs::write(&path, serde_json::to_vec(artifact).unwrap()).unwrap();
    path
}

pub fn write_bincode(dir: &Path, artifact: &ModelArtifact) -> PathBuf {
    let path = dir.join("model.bin");
    std::fs::write(&path, bincode::serialize(artifact).unwrap()).unwrap();
    path
}

/// The submission used throughout the scenarios
pub fn scenario_form() -> PredictionForm {
    PredictionForm {
        age: 30,
        weight: 70.0,
        height: 1.7,
        income_lpa: 5.0,
        smoker: true,
        city: City::Delhi,
        occupation: Occupation::Student,
    }
}
