/// Model layer: the classifier capability, the artifact adapter behind it and
/// the load-once cache that owns the process-wide handle
///
/// - `artifact`: on-disk envelope (JSON or bincode) around a smartcore estimator
/// - `classifier`: the `Classifier` trait and the artifact-backed adapter
/// - `loader`: lazy, cached loading of the configured artifact

pub mod artifact;
pub mod classifier;
pub mod loader;
pub mod models;

pub use artifact::{ArtifactFormat, Estimator, ModelArtifact};
pub use classifier::{ArtifactClassifier, Classifier};
pub use loader::{ArtifactSource, FileArtifactSource, ModelLoader};
pub use models::{ArtifactMetadata, Category, ModelError, ModelResult};
