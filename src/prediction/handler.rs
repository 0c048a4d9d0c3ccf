use crate::error::{AppError, Result};
use crate::metrics::{PREDICTIONS_TOTAL, PREDICTION_DURATION_SECONDS};
use crate::ml::{Category, ModelLoader};
use crate::models::{FeatureRecord, PredictionForm};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs one prediction per form submission against the shared classifier
#[derive(Clone)]
pub struct PredictionHandler {
    loader: Arc<ModelLoader>,
}

impl PredictionHandler {
    pub fn new(loader: Arc<ModelLoader>) -> Self {
        Self { loader }
    }

    pub fn loader(&self) -> &Arc<ModelLoader> {
        &self.loader
    }

    /// Predict the premium category for already-validated form values
    pub fn predict(&self, form: &PredictionForm) -> Result<Category> {
        let result = self.run(form);

        let outcome = match &result {
            Ok(_) => "success",
            Err(AppError::ModelUnavailable) => "model_unavailable",
            Err(AppError::PredictionType(_)) => "type_error",
            Err(_) => "error",
        };
        PREDICTIONS_TOTAL.with_label_values(&[outcome]).inc();

        result
    }

    /// Predict and fold the result into a renderable outcome
    pub fn handle(&self, form: &PredictionForm) -> PredictionOutcome {
        PredictionOutcome::from(self.predict(form))
    }

    fn run(&self, form: &PredictionForm) -> Result<Category> {
        let Some(classifier) = self.loader.load_model() else {
            warn!("Prediction requested without a loaded model");
            return Err(AppError::ModelUnavailable);
        };

        let record = FeatureRecord::assemble(form);
        debug!(record = ?record, "Assembled feature record");

        let timer = PREDICTION_DURATION_SECONDS.start_timer();
        let predictions = classifier.predict(std::slice::from_ref(&record));
        timer.observe_duration();

        let category = predictions?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Prediction("classifier returned no prediction".to_string()))?;

        info!(category = %category, "Predicted premium category");
        Ok(category)
    }
}

/// What the user sees after a submission: a category or an error, never both
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Success {
        category: Category,
    },
    Failure {
        code: String,
        message: String,
        hints: Vec<String>,
    },
}

impl PredictionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PredictionOutcome::Success { .. })
    }

    /// Headline line of the rendered result
    pub fn message(&self) -> String {
        match self {
            PredictionOutcome::Success { category } => success_message(category),
            PredictionOutcome::Failure { message, .. } => message.clone(),
        }
    }

    /// Troubleshooting lines under a failure
    pub fn hints(&self) -> &[String] {
        match self {
            PredictionOutcome::Success { .. } => &[],
            PredictionOutcome::Failure { hints, .. } => hints,
        }
    }
}

impl From<Result<Category>> for PredictionOutcome {
    fn from(result: Result<Category>) -> Self {
        match result {
            Ok(category) => PredictionOutcome::Success { category },
            Err(err) => PredictionOutcome::Failure {
                code: err.error_code().to_string(),
                message: err.to_string(),
                hints: err.hints().iter().map(|hint| hint.to_string()).collect(),
            },
        }
    }
}

/// Rendered success line
pub fn success_message(category: &Category) -> String {
    format!("Predicted Premium Category: {}", category)
}
