use crate::ml::artifact::ModelArtifact;
use crate::ml::models::{ArtifactMetadata, Category, ModelError, ModelResult};
use crate::models::{FeatureRecord, FeatureValue};
use ndarray::Array2;
use smartcore::linalg::basic::matrix::DenseMatrix;

/// Capability the prediction handler needs from a loaded model
pub trait Classifier: Send + Sync {
    /// Predict one category per record
    fn predict(&self, records: &[FeatureRecord]) -> ModelResult<Vec<Category>>;

    /// Get model metadata
    fn metadata(&self) -> &ArtifactMetadata;
}

/// Classifier backed by a deserialized [`ModelArtifact`]
///
/// Text features are only usable when the artifact declares an encoding for
/// them. Without one the record is rejected the same way a numeric-only model
/// rejects raw strings.
pub struct ArtifactClassifier {
    artifact: ModelArtifact,
}

impl ArtifactClassifier {
    pub fn new(artifact: ModelArtifact) -> Self {
        Self { artifact }
    }

    fn check_feature_names(&self, record: &FeatureRecord) -> ModelResult<()> {
        let received: Vec<&str> = record.fields().iter().map(|(name, _)| *name).collect();
        let expected: Vec<&str> = self
            .artifact
            .feature_names
            .iter()
            .map(String::as_str)
            .collect();

        if received != expected {
            return Err(ModelError::Prediction(format!(
                "The feature names should match those that were passed during fit. Expected {:?}, got {:?}",
                expected, received
            )));
        }

        Ok(())
    }

    fn encode(&self, name: &str, value: FeatureValue<'_>) -> ModelResult<f64> {
        match value {
            FeatureValue::Integer(v) => Ok(v as f64),
            FeatureValue::Real(v) => Ok(v),
            FeatureValue::Text(text) => self
                .artifact
                .categorical_encodings
                .get(name)
                .and_then(|codes| codes.get(text))
                .copied()
                .ok_or_else(|| {
                    ModelError::PredictionType(format!(
                        "could not convert string to float: '{}'",
                        text
                    ))
                }),
        }
    }

    fn to_feature_matrix(&self, records: &[FeatureRecord]) -> ModelResult<Array2<f64>> {
        let n_features = self.artifact.feature_names.len();
        let mut values = Vec::with_capacity(records.len() * n_features);

        for record in records {
            self.check_feature_names(record)?;
            for (name, value) in record.fields() {
                values.push(self.encode(name, value)?);
            }
        }

        Array2::from_shape_vec((records.len(), n_features), values)
            .map_err(|e| ModelError::Prediction(format!("Failed to create feature array: {}", e)))
    }

    fn ndarray_to_densematrix(arr: &Array2<f64>) -> DenseMatrix<f64> {
        let shape = arr.shape();
        let data: Vec<f64> = arr.iter().copied().collect();
        DenseMatrix::new(shape[0], shape[1], data, false)
    }
}

impl Classifier for ArtifactClassifier {
    fn predict(&self, records: &[FeatureRecord]) -> ModelResult<Vec<Category>> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let features = self.to_feature_matrix(records)?;
        let x = Self::ndarray_to_densematrix(&features);
        let class_ids = self.artifact.estimator.predict(&x)?;

        Ok(class_ids
            .into_iter()
            .map(|id| self.artifact.metadata.category_for(id))
            .collect())
    }

    fn metadata(&self) -> &ArtifactMetadata {
        &self.artifact.metadata
    }
}
