//! Presentation helpers
//!
//! Computations always run at full precision. These helpers exist for the
//! presentation boundary only, where values are shown with a fixed number of
//! decimal digits.

use std::fmt;

use crate::types::{Metrics, Model};

/// Decimal digits shown for model parameters and metrics
pub const DISPLAY_PRECISION: usize = 4;

/// Round `value` to `digits` decimal places
///
/// Non-finite values are returned unchanged, as are values too large to carry
/// `digits` fractional digits.
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    // Beyond 2^52 every f64 is already an integer
    if !scaled.is_finite() || scaled.abs() >= 4_503_599_627_370_496.0 {
        return value;
    }
    scaled.round() / factor
}

impl Model {
    /// Copy of the model rounded to `DISPLAY_PRECISION` digits
    pub fn rounded(&self) -> Model {
        Model {
            slope: round_to(self.slope, DISPLAY_PRECISION),
            intercept: round_to(self.intercept, DISPLAY_PRECISION),
            mean_x: round_to(self.mean_x, DISPLAY_PRECISION),
            mean_y: round_to(self.mean_y, DISPLAY_PRECISION),
        }
    }
}

impl Metrics {
    /// Copy of the metrics rounded to `DISPLAY_PRECISION` digits
    pub fn rounded(&self) -> Metrics {
        Metrics {
            mse: round_to(self.mse, DISPLAY_PRECISION),
            rmse: round_to(self.rmse, DISPLAY_PRECISION),
            mae: round_to(self.mae, DISPLAY_PRECISION),
            r2: round_to(self.r2, DISPLAY_PRECISION),
            adjusted_r2: round_to(self.adjusted_r2, DISPLAY_PRECISION),
            n: self.n,
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = DISPLAY_PRECISION;
        write!(
            f,
            "y = {:.p$}x {} {:.p$}",
            self.slope,
            if self.intercept < 0.0 { '-' } else { '+' },
            self.intercept.abs(),
        )
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = DISPLAY_PRECISION;
        write!(
            f,
            "MSE={:.p$} RMSE={:.p$} MAE={:.p$} R²={:.p$} adj. R²={:.p$} (n={})",
            self.mse, self.rmse, self.mae, self.r2, self.adjusted_r2, self.n
        )
    }
}
