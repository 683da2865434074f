//! Diagnostic functions for the fitted line

mod information_criteria;
mod jarque_bera;
mod residuals;

pub use information_criteria::{compute_aic, compute_aic_bic, compute_bic, SIMPLE_MODEL_PARAMS};
pub use jarque_bera::{jarque_bera, JarqueBeraResult};
pub use residuals::{compute_residuals, ResidualsResult};
