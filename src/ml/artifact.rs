use crate::ml::models::{ArtifactMetadata, ModelError, ModelResult};
use serde::{Deserialize, Serialize};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::linear::logistic_regression::LogisticRegression;
use smartcore::tree::decision_tree_classifier::DecisionTreeClassifier;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Decision tree over a dense feature matrix with integer class ids
pub type DecisionTreeModel = DecisionTreeClassifier<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Logistic regression over a dense feature matrix with integer class ids
pub type LogisticRegressionModel = LogisticRegression<f64, i32, DenseMatrix<f64>, Vec<i32>>;

/// Serialized estimators an artifact may carry
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Estimator {
    DecisionTree(DecisionTreeModel),
    LogisticRegression(LogisticRegressionModel),
}

impl Estimator {
    pub fn kind(&self) -> &'static str {
        match self {
            Estimator::DecisionTree(_) => "decision_tree",
            Estimator::LogisticRegression(_) => "logistic_regression",
        }
    }

    /// Predict class ids for every row of `x`
    pub fn predict(&self, x: &DenseMatrix<f64>) -> ModelResult<Vec<i32>> {
        let predictions = match self {
            Estimator::DecisionTree(model) => model.predict(x),
            Estimator::LogisticRegression(model) => model.predict(x),
        };

        predictions.map_err(|e| ModelError::Prediction(format!("Prediction failed: {}", e)))
    }
}

impl fmt::Debug for Estimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Estimator").field(&self.kind()).finish()
    }
}

/// On-disk envelope around a trained estimator
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Descriptive header
    pub metadata: ArtifactMetadata,

    /// Column names the estimator was fitted on, in order
    pub feature_names: Vec<String>,

    /// Numeric codes for text features, keyed by feature name then value
    #[serde(default)]
    pub categorical_encodings: HashMap<String, HashMap<String, f64>>,

    /// Trained estimator
    pub estimator: Estimator,
}

impl ModelArtifact {
    /// Read and decode an artifact, picking the decoder from the file extension
    pub fn read(path: &Path) -> ModelResult<Self> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ModelError::ArtifactNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(ModelError::ArtifactCorrupt(e.to_string())),
        };

        ArtifactFormat::from_path(path)?.decode(&bytes)
    }
}

/// Encodings an artifact file may use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => Ok(ArtifactFormat::Json),
            Some("bin") | Some("bincode") => Ok(ArtifactFormat::Bincode),
            Some(other) => Err(ModelError::ArtifactCorrupt(format!(
                "unsupported artifact format '.{}'",
                other
            ))),
            None => Err(ModelError::ArtifactCorrupt(format!(
                "cannot determine artifact format of '{}'",
                path.display()
            ))),
        }
    }

    pub fn decode(self, bytes: &[u8]) -> ModelResult<ModelArtifact> {
        match self {
            ArtifactFormat::Json => serde_json::from_slice(bytes)
                .map_err(|e| ModelError::ArtifactCorrupt(e.to_string())),
            ArtifactFormat::Bincode => {
                bincode::deserialize(bytes).map_err(|e| ModelError::ArtifactCorrupt(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            ArtifactFormat::from_path(Path::new("model.json")).unwrap(),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::from_path(Path::new("models/premium.BIN")).unwrap(),
            ArtifactFormat::Bincode
        );
        assert!(matches!(
            ArtifactFormat::from_path(Path::new("model.pkl")),
            Err(ModelError::ArtifactCorrupt(_))
        ));
        assert!(ArtifactFormat::from_path(Path::new("model")).is_err());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");

        match ModelArtifact::read(&path) {
            Err(ModelError::ArtifactNotFound { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected ArtifactNotFound, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_truncated_json_is_corrupt() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(br#"{"metadata": {"name": "premium""#).unwrap();

        let err = ModelArtifact::read(file.path()).unwrap_err();
        assert!(matches!(err, ModelError::ArtifactCorrupt(_)));
        assert!(err.to_string().starts_with("Error loading model: "));
    }

    #[test]
    fn test_garbage_bincode_is_corrupt() {
        let mut file = tempfile::Builder::new().suffix(".bin").tempfile().unwrap();
        file.write_all(&[0xff, 0x01, 0x02]).unwrap();

        assert!(matches!(
            ModelArtifact::read(file.path()),
            Err(ModelError::ArtifactCorrupt(_))
        ));
    }
}
