//! InsureMate: a health insurance premium category form backed by a
//! pre-trained classifier.
//!
//! A submission flows through three pieces:
//! - [`models::PredictionForm`] validates the seven inputs,
//! - [`prediction::PredictionHandler`] assembles a [`models::FeatureRecord`]
//!   and calls the classifier held by [`ml::ModelLoader`],
//! - [`api`] renders the outcome as HTML or JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod ml;
pub mod models;
pub mod prediction;

pub use error::{AppError, Result};
