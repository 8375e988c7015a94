//! Dialectic Environment Abstraction Layer
//!
//! This crate isolates every source of entropy the Dialectic engines consume,
//! so the same evolution code runs against **seeded Gaussian noise** in a
//! normal run and against **zero noise** in golden-value tests.
//!
//! # Core Concept: Injected Randomness
//!
//! Nothing in `dialectic_core` touches a process-wide generator:
//! - Perturbations come through the [`NoiseSource`] trait
//! - Categorical draws take an explicit `rand::Rng`
//!
//! Deriving all entropy from a single 64-bit seed makes any run
//! reproducible from its seed number.
//!
//! # Example
//!
//! ```ignore
//! use dialectic_env::{GaussianNoise, NoiseSource};
//!
//! let mut noise = GaussianNoise::new(42, 0.1)?;
//! let perturbation: Vec<f64> = (0..4).map(|_| noise.draw()).collect();
//! ```

mod error;
mod noise;

pub use error::EnvError;
pub use noise::{GaussianNoise, NoiseSource, ZeroNoise, DEFAULT_NOISE_STD};
