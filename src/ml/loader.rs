use crate::metrics::{MODEL_LOADED, MODEL_LOADS_TOTAL};
use crate::ml::artifact::ModelArtifact;
use crate::ml::classifier::{ArtifactClassifier, Classifier};
use crate::ml::models::{ModelError, ModelResult};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Somewhere a classifier can be loaded from
pub trait ArtifactSource: Send + Sync {
    /// Human-readable location used in logs and model info
    fn location(&self) -> String;

    /// Deserialize the classifier
    fn open(&self) -> ModelResult<Arc<dyn Classifier>>;
}

/// Artifact stored in a local file
#[derive(Debug, Clone)]
pub struct FileArtifactSource {
    path: PathBuf,
}

impl FileArtifactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ArtifactSource for FileArtifactSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn open(&self) -> ModelResult<Arc<dyn Classifier>> {
        let artifact = ModelArtifact::read(&self.path)?;
        info!(
            model = %artifact.metadata.name,
            version = %artifact.metadata.version,
            estimator = artifact.estimator.kind(),
            "Deserialized model artifact"
        );
        Ok(Arc::new(ArtifactClassifier::new(artifact)))
    }
}

enum LoadState {
    Loaded(Arc<dyn Classifier>),
    Failed(ModelError),
}

/// Loads the classifier on first access and caches the outcome for the
/// lifetime of the loader
///
/// Failures are cached as well: a broken artifact stays broken until the
/// process is restarted.
pub struct ModelLoader {
    source: Box<dyn ArtifactSource>,
    state: OnceCell<LoadState>,
}

impl ModelLoader {
    pub fn new(source: impl ArtifactSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            state: OnceCell::new(),
        }
    }

    /// Loader for an artifact file
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(FileArtifactSource::new(path))
    }

    pub fn location(&self) -> String {
        self.source.location()
    }

    /// The loaded classifier, or `None` when the artifact could not be loaded
    pub fn load_model(&self) -> Option<Arc<dyn Classifier>> {
        match self.state() {
            LoadState::Loaded(classifier) => Some(classifier.clone()),
            LoadState::Failed(_) => None,
        }
    }

    /// Why loading failed, if it did
    pub fn load_error(&self) -> Option<&ModelError> {
        match self.state() {
            LoadState::Loaded(_) => None,
            LoadState::Failed(err) => Some(err),
        }
    }

    /// Whether the load routine has already run
    pub fn is_initialized(&self) -> bool {
        self.state.get().is_some()
    }

    fn state(&self) -> &LoadState {
        self.state.get_or_init(|| self.load())
    }

    fn load(&self) -> LoadState {
        let location = self.source.location();
        info!(artifact = %location, "Loading model artifact");

        match self.source.open() {
            Ok(classifier) => {
                MODEL_LOADS_TOTAL.with_label_values(&["success"]).inc();
                MODEL_LOADED.set(1.0);
                info!(
                    artifact = %location,
                    classes = ?classifier.metadata().classes,
                    "✅ Model loaded"
                );
                LoadState::Loaded(classifier)
            }
            Err(err) => {
                let result = match err {
                    ModelError::ArtifactNotFound { .. } => "not_found",
                    _ => "corrupt",
                };
                MODEL_LOADS_TOTAL.with_label_values(&[result]).inc();
                MODEL_LOADED.set(0.0);
                error!(artifact = %location, error = %err, "Failed to load model");
                LoadState::Failed(err)
            }
        }
    }
}
