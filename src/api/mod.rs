pub mod handlers;
pub mod page;
pub mod routes;

pub use routes::*;

use crate::prediction::PredictionHandler;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictions: Arc<PredictionHandler>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(predictions: Arc<PredictionHandler>) -> Self {
        Self {
            predictions,
            started_at: Instant::now(),
        }
    }
}
