use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::diagnostics::{JarqueBeraResult, ResidualsResult};
use crate::errors::{StatsError, StatsResult};

// ============================================================================
// Data model
// ============================================================================

/// A single synthetic observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Predictor value
    pub x: f64,
    /// Response value
    pub y: f64,
    /// Index in generation order (assigned before sorting)
    pub id: usize,
}

/// Observations sorted ascending by `x`
///
/// The sort is stable, so observations with equal `x` keep their generation
/// order. Nothing is ever filtered out: the length is always the number of
/// observations the dataset was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    observations: Vec<Observation>,
}

impl Dataset {
    /// Build a dataset from observations, sorting them ascending by `x`
    pub fn new(mut observations: Vec<Observation>) -> Self {
        observations.sort_by(|a, b| a.x.total_cmp(&b.x));
        Self { observations }
    }

    /// Build a dataset from `(x, y)` pairs; ids follow the input order
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let observations = points
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Observation { x, y, id })
            .collect();
        Self::new(observations)
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn xs(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.y).collect()
    }

    /// Observations in the order they were generated (ascending `id`)
    pub fn in_generation_order(&self) -> Vec<Observation> {
        let mut ordered = self.observations.clone();
        ordered.sort_by_key(|o| o.id);
        ordered
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub slope: f64,
    pub intercept: f64,
    /// Mean of the predictor over the training dataset
    pub mean_x: f64,
    /// Mean of the response over the training dataset
    pub mean_y: f64,
}

impl Model {
    pub fn predict_one(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// An observation paired with the model's prediction for it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub x: f64,
    pub y: f64,
    pub id: usize,
    pub predicted: f64,
}

impl Prediction {
    /// Actual minus predicted
    pub fn residual(&self) -> f64 {
        self.y - self.predicted
    }
}

/// Goodness-of-fit statistics, kept at full precision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Mean squared error
    pub mse: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// R-squared (coefficient of determination)
    pub r2: f64,
    /// Adjusted R-squared (one predictor)
    pub adjusted_r2: f64,
    /// Number of predictions scored
    pub n: usize,
}

// ============================================================================
// Inference
// ============================================================================

/// Inference statistics for one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoefficientInference {
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    /// Two-sided p-value
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
}

/// Inference results for the slope and intercept
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub slope: CoefficientInference,
    pub intercept: CoefficientInference,
    /// sqrt(SSR / (n - 2))
    pub residual_std_error: f64,
    /// F-statistic for overall model significance
    pub f_statistic: f64,
    /// p-value for F-statistic
    pub f_pvalue: f64,
    /// Residual degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
    /// Confidence level used (e.g., 0.95)
    pub confidence_level: f64,
}

/// Residual diagnostics for a fitted model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub residuals: ResidualsResult,
    /// AIC (Akaike Information Criterion)
    pub aic: f64,
    /// BIC (Bayesian Information Criterion)
    pub bic: f64,
    /// Normality test on the raw residuals, `None` when undefined
    pub jarque_bera: Option<JarqueBeraResult>,
}

/// Everything produced by one training invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainResult {
    pub dataset: Dataset,
    pub model: Model,
    pub predictions: Vec<Prediction>,
    pub metrics: Metrics,
    pub inference: Option<Inference>,
    pub diagnostics: Option<Diagnostics>,
}

// ============================================================================
// Options
// ============================================================================

/// Sample sizes a presentation layer should offer by default
pub const RECOMMENDED_SAMPLE_SIZE: RangeInclusive<usize> = 50..=200;

/// Noise levels a presentation layer should offer by default
pub const RECOMMENDED_NOISE_LEVEL: RangeInclusive<f64> = 0.05..=0.5;

/// Options for the synthetic dataset generator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Slope of the latent noiseless line
    pub true_slope: f64,
    /// Intercept of the latent noiseless line
    pub true_intercept: f64,
    /// Inclusive lower bound for `x`
    pub x_min: f64,
    /// Exclusive upper bound for `x`
    pub x_max: f64,
    /// Noise half-width is `noise_level * noise_scale / 2`
    pub noise_scale: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            true_slope: 2.5,
            true_intercept: 10.0,
            x_min: 0.0,
            x_max: 20.0,
            noise_scale: 50.0,
        }
    }
}

impl GeneratorOptions {
    pub fn validate(&self) -> StatsResult<()> {
        let finite = [
            ("true_slope", self.true_slope),
            ("true_intercept", self.true_intercept),
            ("x_min", self.x_min),
            ("x_max", self.x_max),
            ("noise_scale", self.noise_scale),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(StatsError::invalid(name, format!("must be finite, got {value}")));
            }
        }
        if self.x_min >= self.x_max {
            return Err(StatsError::invalid(
                "x_max",
                format!("must exceed x_min ({} >= {})", self.x_min, self.x_max),
            ));
        }
        if self.noise_scale < 0.0 {
            return Err(StatsError::invalid(
                "noise_scale",
                format!("must be >= 0, got {}", self.noise_scale),
            ));
        }
        Ok(())
    }

    /// Half-width of the uniform noise band for a given noise level
    pub fn noise_half_width(&self, noise_level: f64) -> f64 {
        noise_level * self.noise_scale / 2.0
    }

    /// Largest noise level whose full band width `noise_level * noise_scale`
    /// is still a finite f64
    pub fn max_noise_level(&self) -> f64 {
        if self.noise_scale > 0.0 {
            f64::MAX / self.noise_scale
        } else {
            f64::INFINITY
        }
    }
}

/// Options for a full training invocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainOptions {
    pub generator: GeneratorOptions,
    /// Largest sample size `train` accepts
    pub max_sample_size: usize,
    /// Whether to compute inference statistics (std errors, p-values, etc.)
    pub compute_inference: bool,
    /// Whether to compute residual diagnostics
    pub compute_diagnostics: bool,
    /// Confidence level for confidence intervals (default: 0.95)
    pub confidence_level: f64,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            max_sample_size: 100_000,
            compute_inference: false,
            compute_diagnostics: false,
            confidence_level: 0.95,
        }
    }
}

impl TrainOptions {
    /// Parse options from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> StatsResult<Self> {
        let options: Self = serde_json::from_str(json)
            .map_err(|e| StatsError::invalid("options", format!("invalid JSON: {e}")))?;
        options.generator.validate()?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_sorted_and_ids_preserved() {
        let dataset = Dataset::from_points(&[(3.0, 1.0), (1.0, 2.0), (2.0, 3.0), (1.0, 4.0)]);

        let xs = dataset.xs();
        assert_eq!(xs, vec![1.0, 1.0, 2.0, 3.0]);

        // Stable: the two x = 1.0 points keep input order
        let ids: Vec<usize> = dataset.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 3, 2, 0]);

        let original: Vec<(f64, f64)> = dataset
            .in_generation_order()
            .iter()
            .map(|o| (o.x, o.y))
            .collect();
        assert_eq!(original, vec![(3.0, 1.0), (1.0, 2.0), (2.0, 3.0), (1.0, 4.0)]);
    }

    #[test]
    fn test_generator_options_validation() {
        assert!(GeneratorOptions::default().validate().is_ok());

        let bad_range = GeneratorOptions {
            x_min: 5.0,
            x_max: 5.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_range.validate(),
            Err(StatsError::InvalidParameter { name: "x_max", .. })
        ));

        let bad_slope = GeneratorOptions {
            true_slope: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad_slope.validate(),
            Err(StatsError::InvalidParameter {
                name: "true_slope",
                ..
            })
        ));
    }

    #[test]
    fn test_noise_half_width() {
        let options = GeneratorOptions::default();
        assert!((options.noise_half_width(0.1) - 2.5).abs() < 1e-12);
        assert_eq!(options.noise_half_width(0.0), 0.0);

        let silent = GeneratorOptions {
            noise_scale: 0.0,
            ..Default::default()
        };
        assert_eq!(silent.max_noise_level(), f64::INFINITY);
    }

    #[test]
    fn test_train_options_from_json() {
        let options = TrainOptions::from_json(
            r#"{"compute_inference": true, "generator": {"true_slope": -1.5}}"#,
        )
        .unwrap();
        assert!(options.compute_inference);
        assert!(!options.compute_diagnostics);
        assert_eq!(options.generator.true_slope, -1.5);
        assert_eq!(options.generator.true_intercept, 10.0);
        assert_eq!(options.max_sample_size, 100_000);

        assert!(matches!(
            TrainOptions::from_json("{not json"),
            Err(StatsError::InvalidParameter {
                name: "options",
                ..
            })
        ));
        assert!(TrainOptions::from_json(r#"{"generator": {"x_min": 30.0}}"#).is_err());
    }
}
