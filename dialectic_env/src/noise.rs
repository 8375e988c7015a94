//! Noise sources for the evolution loop.

use crate::error::EnvError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Standard deviation of the perturbation applied on every evolution step.
pub const DEFAULT_NOISE_STD: f64 = 0.1;

/// A stream of scalar perturbations.
///
/// The evolution loop asks for one draw per array element per step.
///
/// # Implementations
///
/// - **Runs**: `GaussianNoise` - seeded ChaCha8 + `Normal(0, std)`
/// - **Golden tests**: `ZeroNoise` - always `0.0`
pub trait NoiseSource {
    /// Draws the next perturbation value.
    fn draw(&mut self) -> f64;

    /// Returns the standard deviation of the stream (for logging).
    fn std_dev(&self) -> f64;

    /// Returns the stream's seed (for logging/debugging).
    ///
    /// Unseeded sources return 0.
    fn seed(&self) -> u64;
}

/// Gaussian noise with mean 0, backed by a deterministic RNG.
#[derive(Debug, Clone)]
pub struct GaussianNoise {
    /// Seed the RNG was created from
    seed: u64,

    /// Standard deviation of each draw
    std_dev: f64,

    /// Sampling distribution
    normal: Normal<f64>,

    /// Deterministic RNG
    rng: ChaCha8Rng,
}

impl GaussianNoise {
    /// Creates a seeded Gaussian stream with the given standard deviation.
    pub fn new(seed: u64, std_dev: f64) -> Result<Self, EnvError> {
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(EnvError::invalid_noise(format!(
                "standard deviation must be finite and non-negative, got {}",
                std_dev
            )));
        }

        let normal = Normal::new(0.0, std_dev)
            .map_err(|e| EnvError::invalid_noise(format!("{} (std = {})", e, std_dev)))?;

        Ok(Self {
            seed,
            std_dev,
            normal,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }
}

impl NoiseSource for GaussianNoise {
    fn draw(&mut self) -> f64 {
        self.normal.sample(&mut self.rng)
    }

    fn std_dev(&self) -> f64 {
        self.std_dev
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}

/// A noise source that never perturbs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroNoise;

impl NoiseSource for ZeroNoise {
    fn draw(&mut self) -> f64 {
        0.0
    }

    fn std_dev(&self) -> f64 {
        0.0
    }

    fn seed(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gaussian_noise_deterministic() {
        let mut noise1 = GaussianNoise::new(42, 0.1).unwrap();
        let mut noise2 = GaussianNoise::new(42, 0.1).unwrap();

        for _ in 0..16 {
            assert_eq!(noise1.draw(), noise2.draw());
        }
    }

    #[test]
    fn test_gaussian_noise_different_seeds() {
        let mut noise1 = GaussianNoise::new(1, 0.1).unwrap();
        let mut noise2 = GaussianNoise::new(2, 0.1).unwrap();

        let a: Vec<f64> = (0..8).map(|_| noise1.draw()).collect();
        let b: Vec<f64> = (0..8).map(|_| noise2.draw()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_gaussian_noise_moments() {
        let mut noise = GaussianNoise::new(7, DEFAULT_NOISE_STD).unwrap();
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| noise.draw()).collect();

        let mean = draws.iter().sum::<f64>() / n as f64;
        let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;

        assert_relative_eq!(mean, 0.0, epsilon = 0.005);
        assert_relative_eq!(var.sqrt(), DEFAULT_NOISE_STD, epsilon = 0.005);
    }

    #[test]
    fn test_gaussian_noise_rejects_bad_std() {
        assert!(matches!(
            GaussianNoise::new(42, -0.1),
            Err(EnvError::InvalidNoise(_))
        ));
        assert!(matches!(
            GaussianNoise::new(42, f64::NAN),
            Err(EnvError::InvalidNoise(_))
        ));
        assert!(matches!(
            GaussianNoise::new(42, f64::INFINITY),
            Err(EnvError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_negative_std_rejected_even_when_tiny() {
        assert!(matches!(
            GaussianNoise::new(42, -1e-12),
            Err(EnvError::InvalidNoise(_))
        ));
    }

    #[test]
    fn test_zero_std_is_silent() {
        let mut noise = GaussianNoise::new(42, 0.0).unwrap();
        assert!((0..10).all(|_| noise.draw() == 0.0));
    }

    #[test]
    fn test_zero_noise() {
        let mut noise = ZeroNoise;
        assert_eq!(noise.draw(), 0.0);
        assert_eq!(noise.std_dev(), 0.0);
        assert_eq!(noise.seed(), 0);
    }
}
