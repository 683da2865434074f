//! simreg-core: single-predictor OLS regression engine
//!
//! Generates a noisy linear dataset, fits a line in closed form, predicts
//! every observation and scores the fit. Every stage is a pure function; the
//! only source of nondeterminism is the random generator passed by the caller.

pub mod diagnostics;
pub mod display;
pub mod errors;
pub mod generator;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod types;

pub use errors::{StatsError, StatsResult};
pub use generator::generate;
pub use metrics::evaluate;
pub use models::{compute_inference, fit, predict};
pub use pipeline::{train, train_from_entropy, train_seeded};
pub use types::*;
