//! End-to-end training: generate → fit → predict → evaluate
//!
//! Each invocation is self-contained. Nothing is cached between calls and a
//! failed call has no effect on any earlier result.

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::diagnostics::{
    compute_aic_bic, compute_residuals, jarque_bera, SIMPLE_MODEL_PARAMS,
};
use crate::errors::{StatsError, StatsResult};
use crate::generator::generate;
use crate::metrics::{evaluate, residual_sum_of_squares};
use crate::models::{compute_inference, fit, predict};
use crate::types::{Dataset, Diagnostics, Prediction, TrainOptions, TrainResult};

/// Run the full pipeline once
///
/// # Arguments
/// * `sample_size` - Number of observations, in `1..=options.max_sample_size`
/// * `noise_level` - Noise factor (>= 0)
/// * `options` - Generator and optional-stage settings
/// * `rng` - Random source for dataset generation
///
/// # Errors
/// Any `StatsError` raised by a stage is returned unchanged.
pub fn train<R: Rng + ?Sized>(
    sample_size: usize,
    noise_level: f64,
    options: &TrainOptions,
    rng: &mut R,
) -> StatsResult<TrainResult> {
    if sample_size > options.max_sample_size {
        return Err(StatsError::invalid(
            "sample_size",
            format!(
                "must be <= {}, got {}",
                options.max_sample_size, sample_size
            ),
        ));
    }

    let dataset = generate(sample_size, noise_level, &options.generator, rng)?;
    let model = fit(&dataset)?;
    let predictions = predict(&model, &dataset);
    let metrics = evaluate(&predictions)?;

    let inference = if options.compute_inference {
        Some(compute_inference(
            &dataset,
            &model,
            &predictions,
            options.confidence_level,
        )?)
    } else {
        None
    };

    let diagnostics = if options.compute_diagnostics {
        Some(diagnose(&dataset, &predictions)?)
    } else {
        None
    };

    debug!(
        "trained on {} samples (noise_level={}): {} | {}",
        sample_size, noise_level, model, metrics
    );

    Ok(TrainResult {
        dataset,
        model,
        predictions,
        metrics,
        inference,
        diagnostics,
    })
}

/// Run the pipeline with a `ChaCha8Rng` seeded from `seed`
///
/// The same seed and arguments always produce the same result, bit for bit.
pub fn train_seeded(
    sample_size: usize,
    noise_level: f64,
    options: &TrainOptions,
    seed: u64,
) -> StatsResult<TrainResult> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    train(sample_size, noise_level, options, &mut rng)
}

/// Run the pipeline with a freshly seeded random source
pub fn train_from_entropy(
    sample_size: usize,
    noise_level: f64,
    options: &TrainOptions,
) -> StatsResult<TrainResult> {
    let mut rng = ChaCha8Rng::from_rng(&mut rand::rng());
    train(sample_size, noise_level, options, &mut rng)
}

fn diagnose(dataset: &Dataset, predictions: &[Prediction]) -> StatsResult<Diagnostics> {
    let n = predictions.len();
    let rss = residual_sum_of_squares(predictions);
    let residual_std_error = (n > SIMPLE_MODEL_PARAMS)
        .then(|| (rss / (n - SIMPLE_MODEL_PARAMS) as f64).sqrt());

    let y: Vec<f64> = predictions.iter().map(|p| p.y).collect();
    let y_hat: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
    let x = dataset.xs();

    let residuals = compute_residuals(&y, &y_hat, Some(&x), residual_std_error)?;
    let (aic, bic) = compute_aic_bic(rss, n, SIMPLE_MODEL_PARAMS)?;
    let jarque_bera = jarque_bera(&residuals.raw).ok();

    Ok(Diagnostics {
        residuals,
        aic,
        bic,
        jarque_bera,
    })
}
