//! Dialectic Core - seeded Reality/Antireality evolution
//!
//! The library is four small engines over plain data records:
//! 1. **State**: weighted state sets and the initial conditions of a run
//! 2. **Sampling**: categorical draws proportional to |amplitude|²
//! 3. **Flow**: the coupled first-order evolution loop under shared Gaussian noise
//! 4. **Mind**: derived quantities (square root, mean, outer product, co-evolution)

pub mod dialectic_state;
pub mod dialectic_sampling;
pub mod dialectic_flow;
pub mod dialectic_mind;
pub mod error;

// Re-export key types for convenience
pub use dialectic_state::{exceeds_axiom_capacity, InitialConditions, WeightedStateSet};
pub use dialectic_sampling::{sample, sample_index, Sampler};
pub use dialectic_flow::{evolve, linspace, Evolution, Trajectory, TrajectoryStep};
pub use dialectic_mind::{
    adapt, coevolve, consciousness_level, consciousness_level_lossy, evolve_post, mean,
    synthesize, Coevolution, Mind, ScalarTrace, COEVOLVE_COUPLING, COEVOLVE_ITERATIONS,
};
pub use error::{DialecticError, Result};
