pub mod handler;

pub use handler::{success_message, PredictionHandler, PredictionOutcome};
