//! Residual computation for the single-predictor model

use serde::Serialize;

use crate::errors::{StatsError, StatsResult};

/// Result containing different types of residuals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResidualsResult {
    /// Raw residuals: e = y - y_hat
    pub raw: Vec<f64>,
    /// Standardized residuals: e / s (if a positive std error was given)
    pub standardized: Option<Vec<f64>>,
    /// Studentized residuals: e / (s * sqrt(1 - h_ii)) (if x was given)
    pub studentized: Option<Vec<f64>>,
    /// Leverage values (hat diagonal, if x was given)
    pub leverage: Option<Vec<f64>>,
}

/// Compute residuals from y and predicted values
///
/// # Arguments
/// * `y` - Actual values
/// * `y_hat` - Predicted values, same length as `y`
/// * `x` - Predictor values; enables leverage and studentized residuals
/// * `residual_std_error` - Residual standard error `s`
pub fn compute_residuals(
    y: &[f64],
    y_hat: &[f64],
    x: Option<&[f64]>,
    residual_std_error: Option<f64>,
) -> StatsResult<ResidualsResult> {
    let n = y.len();

    if n == 0 {
        return Err(StatsError::insufficient("residuals", 0, 1));
    }

    if y_hat.len() != n {
        return Err(StatsError::DimensionMismatch {
            left: "y",
            left_len: n,
            right: "y_hat",
            right_len: y_hat.len(),
        });
    }
    if let Some(x) = x {
        if x.len() != n {
            return Err(StatsError::DimensionMismatch {
                left: "y",
                left_len: n,
                right: "x",
                right_len: x.len(),
            });
        }
    }

    let raw: Vec<f64> = y.iter().zip(y_hat).map(|(yi, yhi)| yi - yhi).collect();

    let scale = residual_std_error.filter(|s| *s > 0.0);

    let standardized = scale.map(|s| raw.iter().map(|e| e / s).collect());

    let leverage = x.and_then(leverage);

    let studentized = match (scale, &leverage) {
        (Some(s), Some(h)) => Some(
            raw.iter()
                .zip(h)
                .map(|(e, h_ii)| {
                    if *h_ii < 1.0 {
                        e / (s * (1.0 - h_ii).sqrt())
                    } else {
                        f64::NAN
                    }
                })
                .collect(),
        ),
        _ => None,
    };

    Ok(ResidualsResult {
        raw,
        standardized,
        studentized,
        leverage,
    })
}

/// Hat diagonal for a model with intercept and one predictor
///
/// h_ii = 1/n + (x_i - mean_x)² / Sxx. `None` when x has zero variance.
fn leverage(x: &[f64]) -> Option<Vec<f64>> {
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let sxx: f64 = x.iter().map(|xi| (xi - mean_x).powi(2)).sum();
    if sxx <= 0.0 {
        return None;
    }
    Some(
        x.iter()
            .map(|xi| 1.0 / n + (xi - mean_x).powi(2) / sxx)
            .collect(),
    )
}
