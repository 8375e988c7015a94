//! The "STATE" Engine - weighted state sets and initial conditions
//!
//! Holds the static inputs of a run: the two initial arrays (Reality and
//! Antireality), the labeled states with their amplitudes, and the axiom list
//! the state count is checked against.

use crate::dialectic_flow::linspace;
use crate::error::{DialecticError, Result};
use nalgebra::{Complex, DMatrix};

/// An ordered list of labeled states paired with amplitude weights.
///
/// The amplitude list is tiled over the flattened states, so its length must
/// divide the state count. The sampling probability of state `i` is
/// `|amplitude_(i mod m)|²` normalized over all states.
///
/// Read-only once constructed: sampling never mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedStateSet<S> {
    /// Flattened states (row-major when built from a grid)
    states: Vec<S>,

    /// Amplitudes, tiled to the state count on use
    amplitudes: Vec<Complex<f64>>,
}

impl<S> WeightedStateSet<S> {
    /// Creates a set from flat states and complex amplitudes.
    ///
    /// Fails with `ShapeMismatch` when the amplitudes cannot be tiled over
    /// the states.
    pub fn new(states: Vec<S>, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        if amplitudes.is_empty() || states.len() % amplitudes.len() != 0 {
            return Err(DialecticError::shape(
                format!("amplitude count dividing {} states", states.len()),
                format!("{} amplitudes", amplitudes.len()),
            ));
        }

        Ok(Self { states, amplitudes })
    }

    /// Creates a set from real-valued (possibly signed) amplitudes.
    pub fn from_real(states: Vec<S>, amplitudes: &[f64]) -> Result<Self> {
        let amplitudes = amplitudes.iter().map(|&a| Complex::new(a, 0.0)).collect();
        Self::new(states, amplitudes)
    }

    /// Creates a set from a nested grid of states, flattened row by row.
    pub fn from_grid(grid: Vec<Vec<S>>, amplitudes: Vec<Complex<f64>>) -> Result<Self> {
        let states = grid.into_iter().flatten().collect();
        Self::new(states, amplitudes)
    }

    /// Returns the flattened states.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// Returns the amplitudes as given (before tiling).
    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    /// Number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the normalized sampling distribution, one entry per state.
    ///
    /// Fails with `DegenerateDistribution` when the total mass is zero or
    /// not finite.
    pub fn probabilities(&self) -> Result<Vec<f64>> {
        let m = self.amplitudes.len();
        let weights: Vec<f64> = (0..self.states.len())
            .map(|i| self.amplitudes[i % m].norm_sqr())
            .collect();

        let total: f64 = weights.iter().sum();
        if total == 0.0 || !total.is_finite() {
            return Err(DialecticError::degenerate(format!(
                "total probability mass is {} over {} states",
                total,
                self.states.len()
            )));
        }

        Ok(weights.into_iter().map(|w| w / total).collect())
    }
}

/// Returns true when there are more states than axioms to account for them.
///
/// The caller decides how to report it.
pub fn exceeds_axiom_capacity(state_count: usize, axiom_count: usize) -> bool {
    state_count > axiom_count
}

/// Initial conditions of a run.
#[derive(Debug, Clone)]
pub struct InitialConditions {
    /// R0: initial Reality array
    pub reality: DMatrix<f64>,

    /// A0: initial Antireality array (same shape as R0)
    pub antireality: DMatrix<f64>,

    /// Labeled states with their amplitudes
    pub states: WeightedStateSet<String>,

    /// Axiom labels; only their count matters
    pub axioms: Vec<String>,

    /// Ordered time points driving the evolution loop
    pub time_points: Vec<f64>,
}

impl InitialConditions {
    /// The literal example values.
    ///
    /// - R0 = [[1, 0], [0, 1]], A0 = [[0.5, 0.5], [0.2, 0.8]]
    /// - four basis states, two equal amplitudes tiled over them
    /// - three axioms
    /// - 100 time points evenly spaced over [0, 10]
    pub fn example() -> Result<Self> {
        let reality = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let antireality = DMatrix::from_row_slice(2, 2, &[0.5, 0.5, 0.2, 0.8]);

        let amp = std::f64::consts::FRAC_1_SQRT_2;
        let states = WeightedStateSet::from_grid(
            vec![
                vec!["|0⟩".to_string(), "|1⟩".to_string()],
                vec!["|+⟩".to_string(), "|−⟩".to_string()],
            ],
            vec![Complex::new(amp, 0.0), Complex::new(0.0, amp)],
        )?;

        let axioms = ["identity", "non-contradiction", "excluded middle"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        Ok(Self {
            reality,
            antireality,
            states,
            axioms,
            time_points: linspace(0.0, 10.0, 100),
        })
    }

    /// True when the state count exceeds the axiom count.
    pub fn exceeds_axiom_capacity(&self) -> bool {
        exceeds_axiom_capacity(self.states.len(), self.axioms.len())
    }
}
