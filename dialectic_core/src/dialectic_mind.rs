//! The "MIND" Engine - quantities derived from an evolution run
//!
//! Pure transforms over the emergent series (square root, mean, outer
//! product) plus the `Mind` record: a scalar level with append-only traces of
//! what moved it.

use crate::error::{DialecticError, Result};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

/// Default number of co-evolution rounds.
pub const COEVOLVE_ITERATIONS: usize = 10;

/// Fraction of the shared midpoint fed back into each level per round.
pub const COEVOLVE_COUPLING: f64 = 0.1;

/// Append-only history of scalar values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalarTrace(Vec<f64>);

impl ScalarTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a value.
    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }
}

/// Arithmetic mean. Fails with `DomainError` on empty input.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(DialecticError::domain("mean of empty data"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// `level + insight`, recording `insight` in `trace`.
pub fn adapt(level: f64, insight: f64, trace: &mut ScalarTrace) -> f64 {
    trace.push(insight);
    level + insight
}

/// `level + mean(new_data)`, recording the mean in `trace`.
pub fn evolve_post(level: f64, new_data: &[f64], trace: &mut ScalarTrace) -> Result<f64> {
    let m = mean(new_data)?;
    trace.push(m);
    Ok(level + m)
}

/// Elementwise square root of the last emergent value.
///
/// Fails with `DomainError` when the series is empty or any entry of the last
/// value is negative. Use [`consciousness_level_lossy`] to get NaN entries
/// instead.
pub fn consciousness_level(emergent: &[DMatrix<f64>]) -> Result<DMatrix<f64>> {
    let last = emergent
        .last()
        .ok_or_else(|| DialecticError::domain("emergent series is empty"))?;

    if let Some((idx, value)) = last.iter().enumerate().find(|(_, v)| **v < 0.0) {
        let (row, col) = (idx % last.nrows(), idx / last.nrows());
        return Err(DialecticError::domain(format!(
            "square root of negative emergent value {} at ({}, {})",
            value, row, col
        )));
    }

    Ok(last.map(f64::sqrt))
}

/// Elementwise square root of the last emergent value, NaN where negative.
///
/// Returns `None` for an empty series.
pub fn consciousness_level_lossy(emergent: &[DMatrix<f64>]) -> Option<DMatrix<f64>> {
    emergent.last().map(|last| last.map(f64::sqrt))
}

/// Outer product `a ⊗ b`: entry `(i, j)` is `a[i] * b[j]`.
pub fn synthesize(a: &DVector<f64>, b: &DVector<f64>) -> DMatrix<f64> {
    a * b.transpose()
}

/// A scalar level with the traces of everything applied to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mind {
    /// Current level
    level: f64,

    /// Insights applied through `adapt`
    adaptations: ScalarTrace,

    /// Means applied through `evolve_post`
    evolutions: ScalarTrace,
}

impl Mind {
    pub fn new(level: f64) -> Self {
        Self {
            level,
            adaptations: ScalarTrace::new(),
            evolutions: ScalarTrace::new(),
        }
    }

    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn adaptations(&self) -> &ScalarTrace {
        &self.adaptations
    }

    pub fn evolutions(&self) -> &ScalarTrace {
        &self.evolutions
    }

    /// Raises the level by `insight`. Returns the new level.
    pub fn adapt(&mut self, insight: f64) -> f64 {
        self.level = adapt(self.level, insight, &mut self.adaptations);
        self.level
    }

    /// Raises the level by the mean of `new_data`. Returns the new level.
    pub fn evolve_post(&mut self, new_data: &[f64]) -> Result<f64> {
        self.level = evolve_post(self.level, new_data, &mut self.evolutions)?;
        Ok(self.level)
    }
}

/// Outcome of [`coevolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coevolution {
    pub a: Mind,
    pub b: Mind,

    /// Unscaled midpoint of the two levels at the start of each round
    pub shared: ScalarTrace,
}

/// Couples two minds for a fixed number of rounds.
///
/// Each round records the midpoint of the two levels, then feeds
/// `COEVOLVE_COUPLING * midpoint` into `a` via `adapt` and into `b` via
/// `evolve_post`. No randomness, no convergence test.
pub fn coevolve(mut a: Mind, mut b: Mind, iterations: usize) -> Result<Coevolution> {
    let mut shared = ScalarTrace::new();

    for _ in 0..iterations {
        let midpoint = (a.level() + b.level()) / 2.0;
        shared.push(midpoint);

        let feedback = COEVOLVE_COUPLING * midpoint;
        a.adapt(feedback);
        b.evolve_post(&[feedback])?;
    }

    Ok(Coevolution { a, b, shared })
}
