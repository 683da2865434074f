//! Closed-form single-predictor Ordinary Least Squares (OLS)

use log::trace;

use crate::errors::{StatsError, StatsResult};
use crate::types::{Dataset, Model};

/// Fit `y = slope * x + intercept` by ordinary least squares
///
/// slope = (n·Σxy − Σx·Σy) / (n·Σx² − (Σx)²)
/// intercept = mean_y − slope · mean_x
///
/// Sums are taken in a single pass over the full dataset with no centering,
/// so results match the textbook formula bit for bit.
///
/// # Arguments
/// * `dataset` - At least 2 observations with finite `x` and `y`
///
/// # Returns
/// * `Model` with slope, intercept and the means used to derive them
pub fn fit(dataset: &Dataset) -> StatsResult<Model> {
    let n_obs = dataset.len();
    if n_obs < 2 {
        return Err(StatsError::insufficient("slope", n_obs, 2));
    }

    for o in dataset {
        if !o.x.is_finite() {
            return Err(StatsError::invalid(
                "x",
                format!("observation {} has non-finite x ({})", o.id, o.x),
            ));
        }
        if !o.y.is_finite() {
            return Err(StatsError::invalid(
                "y",
                format!("observation {} has non-finite y ({})", o.id, o.y),
            ));
        }
    }

    let first_x = dataset.observations()[0].x;
    if dataset.iter().all(|o| o.x == first_x) {
        return Err(StatsError::degenerate("slope", "all x values are identical"));
    }

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for o in dataset {
        sum_x += o.x;
        sum_y += o.y;
        sum_xy += o.x * o.y;
        sum_xx += o.x * o.x;
    }

    let n = n_obs as f64;
    let denominator = n * sum_xx - sum_x * sum_x;
    // Rounding can push a near-constant x column to zero or below
    if denominator <= 0.0 {
        return Err(StatsError::degenerate(
            "slope",
            "x has zero variance (n·Σx² − (Σx)² <= 0)",
        ));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let mean_x = sum_x / n;
    let mean_y = sum_y / n;
    let intercept = mean_y - slope * mean_x;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(StatsError::degenerate(
            "slope",
            "closed-form solution is not finite",
        ));
    }

    trace!(
        "ols fit: n={} slope={} intercept={} mean_x={} mean_y={}",
        n_obs,
        slope,
        intercept,
        mean_x,
        mean_y
    );

    Ok(Model {
        slope,
        intercept,
        mean_x,
        mean_y,
    })
}
