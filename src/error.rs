use crate::ml::ModelError;
use axum::{
    extract::rejection::{FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message shown when a prediction is requested without a loaded classifier
pub const MODEL_UNAVAILABLE_MESSAGE: &str = "Model is not loaded. Please check the file.";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Form input outside its declared range or enumeration
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// No classifier is available for this process
    #[error("{}", MODEL_UNAVAILABLE_MESSAGE)]
    ModelUnavailable,

    /// The artifact could not be loaded
    #[error("{0}")]
    ModelLoad(String),

    /// The classifier rejected the types of the feature record
    #[error("Prediction Error: {0}")]
    PredictionType(String),

    /// Any other failure raised by the classifier
    #[error("Prediction Error: {0}")]
    Prediction(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal server errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ModelLoad(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::PredictionType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::ModelUnavailable => "MODEL_UNAVAILABLE",
            AppError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            AppError::PredictionType(_) => "PREDICTION_TYPE_ERROR",
            AppError::Prediction(_) => "PREDICTION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Troubleshooting lines shown under the error message
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            AppError::PredictionType(_) => &TYPE_ERROR_HINTS,
            _ => &[],
        }
    }
}

/// Hints for a classifier that expects label-encoded categorical features
pub const TYPE_ERROR_HINTS: [&str; 2] = [
    "If you see an error about 'could not convert string to float', it means your model needs numbers (Label Encoding) but we sent text (Delhi/Student).",
    "If that happens, we need to copy the 'mapping' logic from your main.py file.",
];

/// Convert AppError to HTTP response
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        tracing::error!(
            error_code = error_code,
            status_code = status.as_u16(),
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
                "status": status.as_u16(),
                "hints": self.hints(),
            }
        }));

        (status, body).into_response()
    }
}

/// Predict-time failures keep their category, load-time failures carry the user message
impl From<ModelError> for AppError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::PredictionType(message) => AppError::PredictionType(message),
            ModelError::Prediction(message) => AppError::Prediction(message),
            load @ (ModelError::ArtifactNotFound { .. } | ModelError::ArtifactCorrupt(_)) => {
                AppError::ModelLoad(load.to_string())
            }
        }
    }
}

/// Conversion from serde_json::Error
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Conversion from validator::ValidationErrors
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Unparseable request bodies are reported as validation errors
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Conversion from config::ConfigError
impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::Validation("age".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::ModelUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            AppError::PredictionType("x".to_string()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::Prediction("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::ModelUnavailable.error_code(), "MODEL_UNAVAILABLE");
        assert_eq!(
            AppError::PredictionType("x".to_string()).error_code(),
            "PREDICTION_TYPE_ERROR"
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::ModelUnavailable.to_string(),
            "Model is not loaded. Please check the file."
        );
        assert_eq!(
            AppError::Prediction("boom".to_string()).to_string(),
            "Prediction Error: boom"
        );
    }

    #[test]
    fn test_hints_only_for_type_errors() {
        assert_eq!(AppError::PredictionType("x".to_string()).hints().len(), 2);
        assert!(AppError::Prediction("x".to_string()).hints().is_empty());
        assert!(AppError::ModelUnavailable.hints().is_empty());
    }

    #[test]
    fn test_model_error_conversion() {
        let err: AppError = ModelError::PredictionType("bad".to_string()).into();
        assert!(matches!(err, AppError::PredictionType(_)));

        let err: AppError = ModelError::ArtifactNotFound {
            path: "model.json".into(),
        }
        .into();
        assert!(matches!(err, AppError::ModelLoad(_)));
        assert!(err.to_string().contains("'model.json' not found"));
    }
}
