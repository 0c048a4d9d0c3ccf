use crate::api::page::{self, PageView};
use crate::api::AppState;
use crate::error::{AppError, Result};
use crate::metrics::gather_metrics;
use crate::ml::{ArtifactMetadata, Category};
use crate::models::{FormOptions, PredictionForm};
use crate::prediction::{success_message, PredictionOutcome};
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        State,
    },
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Serialize;
use validator::Validate;

/// Render the empty form with its defaults
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let view = PageView::new(PredictionForm::default()).with_load_error(load_error(&state));
    Html(page::render(&view))
}

/// Handle a browser form submission and re-render the page with the outcome
pub async fn submit_form(
    State(state): State<AppState>,
    payload: std::result::Result<Form<PredictionForm>, FormRejection>,
) -> (StatusCode, Html<String>) {
    let form = match payload {
        Ok(Form(form)) => form,
        Err(rejection) => {
            let outcome = PredictionOutcome::from(Err(AppError::from(rejection)));
            let view = PageView::new(PredictionForm::default())
                .with_load_error(load_error(&state))
                .with_outcome(outcome);
            return (StatusCode::BAD_REQUEST, Html(page::render(&view)));
        }
    };

    let view = PageView::new(form.clone()).with_load_error(load_error(&state));

    if let Err(errors) = form.validate() {
        let outcome = PredictionOutcome::from(Err(AppError::from(errors)));
        return (
            StatusCode::BAD_REQUEST,
            Html(page::render(&view.with_outcome(outcome))),
        );
    }

    let outcome = state.predictions.handle(&form);
    (StatusCode::OK, Html(page::render(&view.with_outcome(outcome))))
}

/// Predict from a JSON body
pub async fn create_prediction(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PredictionForm>, JsonRejection>,
) -> Result<Json<PredictionResponse>> {
    let Json(form) = payload?;
    form.validate()?;

    let category = state.predictions.predict(&form)?;

    Ok(Json(PredictionResponse {
        message: success_message(&category),
        category,
    }))
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub category: Category,
    pub message: String,
}

/// Choices and defaults for building a form client-side
pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::new())
}

/// Describe the loaded artifact
pub async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfoResponse>> {
    let loader = state.predictions.loader();
    let classifier = loader.load_model().ok_or(AppError::ModelUnavailable)?;

    Ok(Json(ModelInfoResponse {
        artifact: loader.location(),
        metadata: classifier.metadata().clone(),
    }))
}

#[derive(Debug, Serialize)]
pub struct ModelInfoResponse {
    pub artifact: String,
    pub metadata: ArtifactMetadata,
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

/// Ready once a classifier is loaded
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
    let loader = state.predictions.loader();
    let ready = loader.load_model().is_some();
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ReadinessResponse {
            ready,
            artifact: loader.location(),
            error: load_error(&state),
        }),
    )
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub artifact: String,
    pub error: Option<String>,
}

/// Prometheus exposition
pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        gather_metrics(),
    )
}

fn load_error(state: &AppState) -> Option<String> {
    state
        .predictions
        .loader()
        .load_error()
        .map(|err| err.to_string())
}
