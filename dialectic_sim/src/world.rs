//! SimWorld - runs the full Dialectic pipeline once.

use crate::context::SimContext;
use crate::error::SimError;

use dialectic_core::{
    coevolve, consciousness_level, consciousness_level_lossy, evolve, synthesize, Coevolution,
    DialecticError, Evolution, InitialConditions, Mind, Sampler,
};
use dialectic_env::DEFAULT_NOISE_STD;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, info, warn};

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Master seed for determinism
    pub seed: u64,

    /// Standard deviation of the evolution noise
    pub noise_std: f64,

    /// Starting level of the first mind
    pub level_a: f64,

    /// Starting level of the second mind
    pub level_b: f64,

    /// Insight applied to the first mind before co-evolution
    pub insight: f64,

    /// Number of co-evolution rounds
    pub coevolve_iterations: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            noise_std: DEFAULT_NOISE_STD,
            level_a: 5.0,
            level_b: 3.0,
            insight: 0.5,
            coevolve_iterations: dialectic_core::COEVOLVE_ITERATIONS,
        }
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Seed used
    pub seed: u64,

    /// State drawn from the weighted state set
    pub observed_state: String,

    /// State count exceeded axiom count
    pub godel_limited: bool,

    /// Trajectory and emergent series
    pub evolution: Evolution,

    /// Square root of the last emergent value, NaN where it was negative
    pub consciousness: Option<DMatrix<f64>>,

    /// Number of negative entries hit by the square root
    pub domain_violations: usize,

    /// Outer product of the final R and A, flattened
    pub synthesis: DMatrix<f64>,

    /// Final co-evolution of the two minds
    pub coevolution: Coevolution,
}

/// The SimWorld - initial conditions plus seeded entropy.
pub struct SimWorld {
    /// Configuration
    pub config: SimConfig,

    /// Seeded entropy
    pub context: SimContext,

    /// Static inputs of the run
    pub initial: InitialConditions,
}

impl SimWorld {
    /// Creates a new SimWorld over the example initial conditions.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        let initial = InitialConditions::example()?;
        Ok(Self::with_initial(config, initial))
    }

    /// Creates a SimWorld over custom initial conditions.
    pub fn with_initial(config: SimConfig, initial: InitialConditions) -> Self {
        let context = SimContext::new(config.seed);
        Self {
            config,
            context,
            initial,
        }
    }

    /// Runs the pipeline: sample, evolve, derive, co-evolve.
    pub fn run(&mut self) -> Result<RunReport, SimError> {
        let init = &self.initial;

        let godel_limited = init.exceeds_axiom_capacity();
        if godel_limited {
            warn!(
                states = init.states.len(),
                axioms = init.axioms.len(),
                "Gödelian Limitations Encountered: more states than axioms can account for"
            );
        }

        let sampler = Sampler::new(&init.states)?;
        let mut sampler_rng = self.context.sampler_rng();
        let observed_state = sampler.draw(&mut sampler_rng).clone();
        info!(state = %observed_state, "Observed state");

        let mut noise = self.context.noise(self.config.noise_std)?;
        let evolution = evolve(&init.reality, &init.antireality, &init.time_points, &mut noise)?;
        info!(steps = evolution.len(), "Reality and antireality evolved");

        let (consciousness, domain_violations) = match consciousness_level(&evolution.emergent) {
            Ok(level) => (Some(level), 0),
            Err(DialecticError::DomainError(msg)) => {
                warn!("Consciousness level undefined, propagating NaN: {}", msg);
                let lossy = consciousness_level_lossy(&evolution.emergent);
                let violations = lossy
                    .as_ref()
                    .map_or(0, |m| m.iter().filter(|v| v.is_nan()).count());
                (lossy, violations)
            }
            Err(e) => return Err(e.into()),
        };

        let (final_reality, final_antireality) = match evolution.trajectory.last() {
            Some(step) => (&step.reality, &step.antireality),
            None => (&init.reality, &init.antireality),
        };

        let mut mind_a = Mind::new(self.config.level_a);
        mind_a.adapt(self.config.insight);

        let mut mind_b = Mind::new(self.config.level_b);
        let emergent: Vec<f64> = final_reality
            .component_mul(final_antireality)
            .iter()
            .copied()
            .collect();
        mind_b.evolve_post(&emergent)?;
        debug!(
            level_a = mind_a.level(),
            level_b = mind_b.level(),
            "Minds primed"
        );

        let synthesis = synthesize(&flatten(final_reality), &flatten(final_antireality));

        let coevolution = coevolve(mind_a, mind_b, self.config.coevolve_iterations)?;
        if let Some(midpoint) = coevolution.shared.last() {
            info!(
                rounds = coevolution.shared.len(),
                midpoint, "Co-evolution complete"
            );
        }

        Ok(RunReport {
            seed: self.context.seed(),
            observed_state,
            godel_limited,
            evolution,
            consciousness,
            domain_violations,
            synthesis,
            coevolution,
        })
    }
}

/// Column-major flattening into a vector.
fn flatten(matrix: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_iterator(matrix.len(), matrix.iter().copied())
}
