//! Jarque-Bera test for normality of residuals
//!
//! OLS inference assumes normally distributed errors; the generator draws
//! uniform noise, so a large enough noisy sample is expected to fail this test.

use serde::Serialize;

use crate::errors::{StatsError, StatsResult};

/// Result of Jarque-Bera test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JarqueBeraResult {
    /// JB test statistic
    pub statistic: f64,
    /// p-value for the test
    pub p_value: f64,
    /// Sample skewness
    pub skewness: f64,
    /// Sample kurtosis (excess)
    pub kurtosis: f64,
    /// Number of observations used
    pub n: usize,
}

/// Compute the Jarque-Bera test statistic for normality
///
/// NaN values are skipped.
///
/// # Errors
/// * `InsufficientData` - fewer than 3 non-NaN values
/// * `DegenerateInput` - the data has zero variance
pub fn jarque_bera(data: &[f64]) -> StatsResult<JarqueBeraResult> {
    let clean_data: Vec<f64> = data.iter().copied().filter(|x| !x.is_nan()).collect();
    let n = clean_data.len();

    if n < 3 {
        return Err(StatsError::insufficient("Jarque-Bera test", n, 3));
    }

    let n_f = n as f64;
    let mean: f64 = clean_data.iter().sum::<f64>() / n_f;

    // Central moments
    let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
    for &x in &clean_data {
        let d = x - mean;
        let d2 = d * d;
        m2 += d2;
        m3 += d2 * d;
        m4 += d2 * d2;
    }
    m2 /= n_f;
    m3 /= n_f;
    m4 /= n_f;

    if m2 <= 0.0 {
        return Err(StatsError::degenerate(
            "Jarque-Bera test",
            "data has zero variance",
        ));
    }

    let skewness = m3 / m2.powf(1.5);
    let kurtosis = m4 / (m2 * m2) - 3.0;

    // JB = n/6 * (S² + K²/4)
    let statistic = (n_f / 6.0) * (skewness * skewness + kurtosis * kurtosis / 4.0);

    // Chi-squared(2) survival function is exactly exp(-x/2)
    let p_value = (-statistic / 2.0).exp();

    Ok(JarqueBeraResult {
        statistic,
        p_value,
        skewness,
        kurtosis,
        n,
    })
}
