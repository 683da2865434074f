//! Coefficient inference for the single-predictor OLS model
//!
//! Standard errors, t statistics, two-sided p-values and confidence intervals
//! for slope and intercept, plus the overall F test.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::errors::{StatsError, StatsResult};
use crate::metrics::residual_sum_of_squares;
use crate::types::{CoefficientInference, Dataset, Inference, Model, Prediction};

fn coefficient(
    estimate: f64,
    std_error: f64,
    t_dist: &StudentsT,
    t_crit: f64,
) -> CoefficientInference {
    let (t_value, p_value) = if std_error > 0.0 {
        let t = estimate / std_error;
        (t, 2.0 * t_dist.sf(t.abs()))
    } else if estimate != 0.0 {
        // Perfect fit: any non-zero estimate is infinitely significant
        (f64::INFINITY.copysign(estimate), 0.0)
    } else {
        // 0 / 0
        (f64::NAN, f64::NAN)
    };

    CoefficientInference {
        estimate,
        std_error,
        t_value,
        p_value,
        ci_lower: estimate - t_crit * std_error,
        ci_upper: estimate + t_crit * std_error,
    }
}

/// Compute inference statistics for a fitted model
///
/// # Arguments
/// * `dataset` - The data the model was fitted on
/// * `model` - Fitted model
/// * `predictions` - Predictions of `model` over `dataset`
/// * `confidence_level` - Confidence level for intervals, in (0, 1)
///
/// # Returns
/// * `Inference` with `n - 2` residual degrees of freedom
pub fn compute_inference(
    dataset: &Dataset,
    model: &Model,
    predictions: &[Prediction],
    confidence_level: f64,
) -> StatsResult<Inference> {
    let n_obs = dataset.len();
    if predictions.len() != n_obs {
        return Err(StatsError::DimensionMismatch {
            left: "dataset",
            left_len: n_obs,
            right: "predictions",
            right_len: predictions.len(),
        });
    }
    if n_obs < 3 {
        return Err(StatsError::insufficient("coefficient inference", n_obs, 3));
    }
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(StatsError::invalid(
            "confidence_level",
            format!("must be in (0, 1), got {confidence_level}"),
        ));
    }

    let n = n_obs as f64;
    let df = n_obs - 2;
    let df_f = df as f64;

    let sxx: f64 = dataset.iter().map(|o| (o.x - model.mean_x).powi(2)).sum();
    if sxx <= 0.0 {
        return Err(StatsError::degenerate(
            "coefficient inference",
            "x has zero variance",
        ));
    }

    let ssr = residual_sum_of_squares(predictions);
    let sigma2 = ssr / df_f;
    let residual_std_error = sigma2.sqrt();

    let se_slope = residual_std_error / sxx.sqrt();
    let se_intercept = residual_std_error * (1.0 / n + model.mean_x.powi(2) / sxx).sqrt();

    let t_dist = StudentsT::new(0.0, 1.0, df_f)
        .map_err(|e| StatsError::invalid("degrees_of_freedom", e.to_string()))?;
    let alpha = 1.0 - confidence_level;
    let t_crit = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    // Explained sum of squares around the mean prediction
    let ssm: f64 = predictions
        .iter()
        .map(|p| (p.predicted - model.mean_y).powi(2))
        .sum();
    let (f_statistic, f_pvalue) = if sigma2 > 0.0 {
        let f = ssm / sigma2;
        let f_dist = FisherSnedecor::new(1.0, df_f)
            .map_err(|e| StatsError::invalid("degrees_of_freedom", e.to_string()))?;
        (f, f_dist.sf(f))
    } else {
        (f64::INFINITY, 0.0)
    };

    Ok(Inference {
        slope: coefficient(model.slope, se_slope, &t_dist, t_crit),
        intercept: coefficient(model.intercept, se_intercept, &t_dist, t_crit),
        residual_std_error,
        f_statistic,
        f_pvalue,
        degrees_of_freedom: df,
        confidence_level,
    })
}
