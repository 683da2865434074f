//! Closed-form single-predictor regression

mod inference;
mod ols;
mod predict;

pub use inference::compute_inference;
pub use ols::fit;
pub use predict::predict;
