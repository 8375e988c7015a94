//! Simulation context: every source of entropy derived from one seed.

use dialectic_env::{EnvError, GaussianNoise};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Salt mixed into the master seed before deriving the noise seed.
const NOISE_SALT: u64 = 0x517cc1b727220a95;

/// Seeded entropy for one simulation run.
///
/// The sampler and the evolution noise get separate streams, so the number
/// of categorical draws never shifts the noise sequence (and vice versa).
/// Every stream is rebuilt from the seed on request, so repeated runs over
/// one context replay the same draws.
pub struct SimContext {
    /// Master seed for this run
    seed: u64,
}

impl SimContext {
    /// Creates a new SimContext with the given seed.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Returns the master seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Seed of the categorical sampling stream.
    pub fn sampler_seed(&self) -> u64 {
        self.seed
    }

    /// Seed of the evolution noise stream.
    pub fn noise_seed(&self) -> u64 {
        (self.seed ^ NOISE_SALT).wrapping_mul(0x9e3779b97f4a7c15)
    }

    /// Fresh RNG for categorical sampling.
    pub fn sampler_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.sampler_seed())
    }

    /// Builds the Gaussian noise stream for the evolution loop.
    pub fn noise(&self, std_dev: f64) -> Result<GaussianNoise, EnvError> {
        GaussianNoise::new(self.noise_seed(), std_dev)
    }
}
