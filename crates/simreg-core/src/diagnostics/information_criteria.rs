//! Information criteria for model selection (AIC, BIC)

use crate::errors::{StatsError, StatsResult};

/// Parameters estimated by the single-predictor model (slope and intercept)
pub const SIMPLE_MODEL_PARAMS: usize = 2;

fn validate(rss: f64, n: usize, criterion: &'static str) -> StatsResult<()> {
    if n == 0 {
        return Err(StatsError::insufficient(criterion, 0, 1));
    }
    if rss.is_nan() || rss < 0.0 {
        return Err(StatsError::invalid(
            "rss",
            format!("must be non-negative, got {rss}"),
        ));
    }
    Ok(())
}

/// Compute AIC (Akaike Information Criterion)
///
/// AIC = n * ln(RSS/n) + 2k
///
/// where:
/// - n = number of observations
/// - RSS = residual sum of squares
/// - k = number of parameters (including intercept)
///
/// Lower AIC indicates better model fit (accounting for complexity).
pub fn compute_aic(rss: f64, n: usize, k: usize) -> StatsResult<f64> {
    validate(rss, n, "AIC")?;

    // Perfect fit
    if rss == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    let n_f = n as f64;
    Ok(n_f * (rss / n_f).ln() + 2.0 * k as f64)
}

/// Compute BIC (Bayesian Information Criterion)
///
/// BIC = n * ln(RSS/n) + k * ln(n)
///
/// BIC penalizes model complexity more heavily than AIC for larger samples.
pub fn compute_bic(rss: f64, n: usize, k: usize) -> StatsResult<f64> {
    validate(rss, n, "BIC")?;

    if rss == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }

    let n_f = n as f64;
    Ok(n_f * (rss / n_f).ln() + k as f64 * n_f.ln())
}

/// Compute both AIC and BIC
pub fn compute_aic_bic(rss: f64, n: usize, k: usize) -> StatsResult<(f64, f64)> {
    Ok((compute_aic(rss, n, k)?, compute_bic(rss, n, k)?))
}
