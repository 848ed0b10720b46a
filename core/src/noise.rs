//! Additive white Gaussian noise for channel simulation
//!
//! This is a test/simulation hook, not a physical channel model. The random
//! source is always passed in so callers control reproducibility and no
//! generator is shared between threads.

use crate::error::{ModemError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Check that a caller-supplied noise level lies in [0, 1].
pub fn validate_noise_level(level: f32) -> Result<f32> {
    if level.is_nan() || !(0.0..=1.0).contains(&level) {
        return Err(ModemError::InvalidNoiseLevel(level));
    }
    Ok(level)
}

/// Deterministic generator for reproducible noise
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Add Gaussian noise with standard deviation `level * amplitude`.
///
/// `level <= 0` returns the samples untouched. Noisy samples are clamped
/// into the i16 range before truncation to an integer.
pub fn apply_noise<R: Rng + ?Sized>(
    samples: &[i16],
    level: f32,
    amplitude: f64,
    rng: &mut R,
) -> Vec<i16> {
    if !(level > 0.0) {
        return samples.to_vec();
    }

    let std_dev = level as f64 * amplitude;
    let normal = match Normal::new(0.0, std_dev) {
        Ok(normal) => normal,
        // Only reachable for a non-finite std_dev
        Err(_) => return samples.to_vec(),
    };

    samples
        .iter()
        .map(|&sample| {
            let noisy = sample as f64 + normal.sample(&mut *rng);
            noisy.clamp(i16::MIN as f64, i16::MAX as f64) as i16
        })
        .collect()
}
