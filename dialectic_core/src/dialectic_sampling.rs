//! The "SAMPLING" Engine - categorical draws over weighted states
//!
//! Each draw picks one state with probability proportional to the squared
//! magnitude of its (tiled) amplitude. The RNG is always passed in, so a
//! seeded generator reproduces the same sequence of states.

use crate::dialectic_state::WeightedStateSet;
use crate::error::{DialecticError, Result};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

/// A prepared categorical distribution over a borrowed state set.
///
/// Build once, draw many times.
#[derive(Debug, Clone)]
pub struct Sampler<'a, S> {
    set: &'a WeightedStateSet<S>,
    index: WeightedIndex<f64>,
}

impl<'a, S> Sampler<'a, S> {
    /// Prepares the distribution for `set`.
    ///
    /// Fails with `DegenerateDistribution` when there is no probability mass.
    pub fn new(set: &'a WeightedStateSet<S>) -> Result<Self> {
        let probabilities = set.probabilities()?;
        let index = WeightedIndex::new(&probabilities)
            .map_err(|e| DialecticError::degenerate(e.to_string()))?;

        Ok(Self { set, index })
    }

    /// Draws the flat index of one state.
    pub fn draw_index<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        self.index.sample(rng)
    }

    /// Draws one state.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> &'a S {
        &self.set.states()[self.draw_index(rng)]
    }
}

/// Draws the flat index of one state from `set`.
pub fn sample_index<S, R: Rng + ?Sized>(set: &WeightedStateSet<S>, rng: &mut R) -> Result<usize> {
    Ok(Sampler::new(set)?.draw_index(rng))
}

/// Draws one state from `set`.
pub fn sample<'a, S, R: Rng + ?Sized>(set: &'a WeightedStateSet<S>, rng: &mut R) -> Result<&'a S> {
    Ok(Sampler::new(set)?.draw(rng))
}
