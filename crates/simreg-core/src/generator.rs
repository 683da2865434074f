//! Synthetic dataset generation
//!
//! Draws `x` uniformly from a fixed range and places `y` on a latent line plus
//! uniform noise whose half-width scales linearly with the noise level.

use log::debug;
use rand::distr::{Distribution, Uniform};
use rand::Rng;

use crate::errors::{StatsError, StatsResult};
use crate::types::{Dataset, GeneratorOptions, Observation};

/// Generate a noisy linear dataset of exactly `n` observations
///
/// # Arguments
/// * `n` - Number of observations (must be > 0)
/// * `noise_level` - Noise factor (must be finite and >= 0, and at most
///   `options.max_noise_level()`); zero disables noise
/// * `options` - Latent line, `x` range and noise scale
/// * `rng` - Random source; pass a seeded generator for reproducible output
///
/// # Returns
/// * `Dataset` sorted ascending by `x`, ids in generation order
pub fn generate<R: Rng + ?Sized>(
    n: usize,
    noise_level: f64,
    options: &GeneratorOptions,
    rng: &mut R,
) -> StatsResult<Dataset> {
    if n == 0 {
        return Err(StatsError::invalid("n", "sample count must be > 0"));
    }
    if !noise_level.is_finite() || noise_level < 0.0 {
        return Err(StatsError::invalid(
            "noise_level",
            format!("must be finite and >= 0, got {noise_level}"),
        ));
    }
    options.validate()?;

    let x_dist = Uniform::new(options.x_min, options.x_max)
        .map_err(|e| StatsError::invalid("x_max", e.to_string()))?;

    if !(noise_level * options.noise_scale).is_finite() {
        return Err(StatsError::invalid(
            "noise_level",
            format!(
                "noise band overflows f64: must be <= {:e} for noise_scale {}, got {noise_level}",
                options.max_noise_level(),
                options.noise_scale
            ),
        ));
    }

    let half_width = options.noise_half_width(noise_level);
    let noise_dist = if half_width > 0.0 {
        Some(
            Uniform::new(-half_width, half_width)
                .map_err(|e| StatsError::invalid("noise_level", e.to_string()))?,
        )
    } else {
        None
    };

    let mut observations = Vec::with_capacity(n);
    for id in 0..n {
        let x = x_dist.sample(&mut *rng);
        let mut y = options.true_slope * x + options.true_intercept;
        if let Some(noise) = &noise_dist {
            y += noise.sample(&mut *rng);
        }
        observations.push(Observation { x, y, id });
    }

    debug!(
        "generated {} observations (noise_level={}, half_width={})",
        n, noise_level, half_width
    );

    Ok(Dataset::new(observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_generate_size_and_order() {
        let options = GeneratorOptions::default();
        for n in [1, 2, 7, 150] {
            let dataset = generate(n, 0.3, &options, &mut rng()).unwrap();
            assert_eq!(dataset.len(), n);
            assert!(dataset.xs().windows(2).all(|w| w[0] <= w[1]));
        }
    }

    #[test]
    fn test_generate_x_range() {
        let options = GeneratorOptions::default();
        let dataset = generate(500, 0.2, &options, &mut rng()).unwrap();
        assert!(dataset.iter().all(|o| o.x >= 0.0 && o.x < 20.0));
    }

    #[test]
    fn test_generate_ids_are_a_permutation() {
        let dataset = generate(64, 0.5, &GeneratorOptions::default(), &mut rng()).unwrap();
        let mut ids: Vec<usize> = dataset.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_generate_noiseless_is_exact() {
        let options = GeneratorOptions::default();
        let dataset = generate(100, 0.0, &options, &mut rng()).unwrap();
        for o in &dataset {
            assert_eq!(o.y, options.true_slope * o.x + options.true_intercept);
        }
    }

    #[test]
    fn test_generate_noise_within_band() {
        let options = GeneratorOptions::default();
        let noise_level = 0.2;
        let half_width = options.noise_half_width(noise_level);
        let dataset = generate(1000, noise_level, &options, &mut rng()).unwrap();
        for o in &dataset {
            let noise = o.y - (options.true_slope * o.x + options.true_intercept);
            assert!(noise.abs() <= half_width + 1e-9);
        }
    }

    #[test]
    fn test_generate_reproducible_with_seed() {
        let options = GeneratorOptions::default();
        let a = generate(100, 0.1, &options, &mut rng()).unwrap();
        let b = generate(100, 0.1, &options, &mut rng()).unwrap();
        assert_eq!(a, b);

        let c = generate(100, 0.1, &options, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_generate_invalid_parameters() {
        let options = GeneratorOptions::default();
        assert!(matches!(
            generate(0, 0.1, &options, &mut rng()),
            Err(StatsError::InvalidParameter { name: "n", .. })
        ));
        assert!(matches!(
            generate(10, -0.1, &options, &mut rng()),
            Err(StatsError::InvalidParameter {
                name: "noise_level",
                ..
            })
        ));
        assert!(matches!(
            generate(10, f64::NAN, &options, &mut rng()),
            Err(StatsError::InvalidParameter {
                name: "noise_level",
                ..
            })
        ));
    }

    #[test]
    fn test_generate_noise_band_overflow() {
        let options = GeneratorOptions::default();

        let dataset = generate(10, 1e300, &options, &mut rng()).unwrap();
        assert!(dataset.ys().iter().all(|y| y.is_finite()));

        match generate(10, 1e307, &options, &mut rng()) {
            Err(StatsError::InvalidParameter { name, reason }) => {
                assert_eq!(name, "noise_level");
                assert!(reason.contains("overflows"));
            }
            other => panic!("expected InvalidParameter, got {other:?}"),
        }
    }
}
