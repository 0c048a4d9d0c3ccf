use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading an artifact or calling its predict operation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Nothing exists at the artifact path
    #[error("Error: '{}' not found. Make sure it's in the same folder as this file.", path.display())]
    ArtifactNotFound { path: PathBuf },

    /// The artifact exists but cannot be deserialized
    #[error("Error loading model: {0}")]
    ArtifactCorrupt(String),

    /// The classifier cannot consume the types in the feature record
    #[error("{0}")]
    PredictionType(String),

    /// Any other failure inside the classifier
    #[error("{0}")]
    Prediction(String),
}

impl ModelError {
    /// True for failures raised while loading, false for predict-time failures
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            ModelError::ArtifactNotFound { .. } | ModelError::ArtifactCorrupt(_)
        )
    }
}

/// Result type for the model layer
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Premium category label returned by a classifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Descriptive header stored alongside a serialized estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,

    /// Training timestamp, when the producer recorded one
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,

    /// Category labels indexed by the estimator's class ids
    pub classes: Vec<String>,
}

impl ArtifactMetadata {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            trained_at: None,
            classes: Vec::new(),
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_trained_at(mut self, trained_at: DateTime<Utc>) -> Self {
        self.trained_at = Some(trained_at);
        self
    }

    /// Label for a class id; ids outside `classes` render as the raw id
    pub fn category_for(&self, class_id: i32) -> Category {
        usize::try_from(class_id)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(|label| Category::new(label.clone()))
            .unwrap_or_else(|| Category::new(class_id.to_string()))
    }
}
