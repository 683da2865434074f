//! Goodness-of-fit metrics over predicted-vs-actual pairs
//!
//! Each statistic is available on its own so callers can score datasets where
//! some of them are undefined (e.g. MSE for a single point, where R² is not).

use log::trace;

use crate::errors::{StatsError, StatsResult};
use crate::types::{Metrics, Prediction};

fn require_non_empty(predictions: &[Prediction], statistic: &'static str) -> StatsResult<f64> {
    if predictions.is_empty() {
        return Err(StatsError::insufficient(statistic, 0, 1));
    }
    Ok(predictions.len() as f64)
}

/// Residual sum of squares: Σ(y − ŷ)²
pub fn residual_sum_of_squares(predictions: &[Prediction]) -> f64 {
    predictions.iter().map(|p| p.residual().powi(2)).sum()
}

/// Total sum of squares around the mean of the actual values
pub fn total_sum_of_squares(predictions: &[Prediction]) -> f64 {
    if predictions.is_empty() {
        return 0.0;
    }
    let mean_actual = predictions.iter().map(|p| p.y).sum::<f64>() / predictions.len() as f64;
    predictions.iter().map(|p| (p.y - mean_actual).powi(2)).sum()
}

/// MSE = (1/n) Σ(y − ŷ)²
pub fn mean_squared_error(predictions: &[Prediction]) -> StatsResult<f64> {
    let n = require_non_empty(predictions, "MSE")?;
    Ok(residual_sum_of_squares(predictions) / n)
}

/// RMSE = sqrt(MSE)
pub fn root_mean_squared_error(predictions: &[Prediction]) -> StatsResult<f64> {
    mean_squared_error(predictions).map(f64::sqrt)
}

/// MAE = (1/n) Σ|y − ŷ|
pub fn mean_absolute_error(predictions: &[Prediction]) -> StatsResult<f64> {
    let n = require_non_empty(predictions, "MAE")?;
    Ok(predictions.iter().map(|p| p.residual().abs()).sum::<f64>() / n)
}

/// R² = 1 − SSR / SST
///
/// The mean of the actual values is taken over `predictions` itself, not over
/// the data the model was trained on, so a filtered subset is scored correctly.
///
/// Fails with `DegenerateInput` when every actual value is equal (SST = 0):
/// that is an undefined R², not an R² of zero.
pub fn r_squared(predictions: &[Prediction]) -> StatsResult<f64> {
    require_non_empty(predictions, "R-squared")?;

    let sst = total_sum_of_squares(predictions);
    if sst == 0.0 {
        return Err(StatsError::degenerate(
            "R-squared",
            "all actual y values are equal (total sum of squares is zero)",
        ));
    }

    Ok(1.0 - residual_sum_of_squares(predictions) / sst)
}

/// Adjusted R² for a single-predictor model
///
/// adj R² = 1 − (1 − R²)(n − 1) / (n − 2), defined for n >= 3.
pub fn adjusted_r_squared(r2: f64, n: usize) -> StatsResult<f64> {
    if n <= 2 {
        return Err(StatsError::insufficient("adjusted R-squared", n, 3));
    }
    let n_f = n as f64;
    Ok(1.0 - ((1.0 - r2) * (n_f - 1.0)) / (n_f - 2.0))
}

/// Compute the full metrics record
///
/// # Errors
/// * `InsufficientData` - no predictions, or fewer than 3 for adjusted R²
/// * `DegenerateInput` - all actual values are equal
pub fn evaluate(predictions: &[Prediction]) -> StatsResult<Metrics> {
    let n = predictions.len();

    let mse = mean_squared_error(predictions)?;
    let mae = mean_absolute_error(predictions)?;
    let r2 = r_squared(predictions)?;
    let adjusted_r2 = adjusted_r_squared(r2, n)?;

    let metrics = Metrics {
        mse,
        rmse: mse.sqrt(),
        mae,
        r2,
        adjusted_r2,
        n,
    };
    trace!("metrics: {:?}", metrics);

    Ok(metrics)
}
