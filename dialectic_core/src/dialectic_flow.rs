//! The "FLOW" Engine - coupled Reality/Antireality evolution
//!
//! Advances two equally-shaped arrays through an ordered sequence of time
//! points with the first-order difference scheme
//!
//! ```text
//! n  ~ N(0, σ²)            (one draw per element, shared by both updates)
//! dR = A - R + n
//! dA = R - A + n
//! R <- R + dR,  A <- A + dA
//! ```
//!
//! There is no convergence check and no stability bound: the loop always runs
//! exactly one step per time point.

use crate::error::{DialecticError, Result};
use dialectic_env::NoiseSource;
use nalgebra::DMatrix;
use tracing::debug;

/// One recorded step of the evolution loop.
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryStep {
    /// Time point that produced this step
    pub time: f64,

    /// R after the update
    pub reality: DMatrix<f64>,

    /// A after the update
    pub antireality: DMatrix<f64>,
}

impl TrajectoryStep {
    /// Elementwise product R ∘ A.
    pub fn emergent(&self) -> DMatrix<f64> {
        self.reality.component_mul(&self.antireality)
    }
}

/// Ordered history of (R, A) pairs, one per time point.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    steps: Vec<TrajectoryStep>,
}

impl Trajectory {
    /// Appends a step.
    fn push(&mut self, step: TrajectoryStep) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[TrajectoryStep] {
        &self.steps
    }

    /// Returns the most recent step.
    pub fn last(&self) -> Option<&TrajectoryStep> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryStep> {
        self.steps.iter()
    }
}

/// Result of a full evolution run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evolution {
    /// Every (R_t, A_t) pair
    pub trajectory: Trajectory,

    /// R_t ∘ A_t at every step
    pub emergent: Vec<DMatrix<f64>>,
}

impl Evolution {
    /// Number of executed steps.
    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }

    /// The last emergent value, if any step ran.
    pub fn last_emergent(&self) -> Option<&DMatrix<f64>> {
        self.emergent.last()
    }
}

/// Runs the evolution loop from `(r0, a0)` over `time_points`.
///
/// The inputs are never modified; every recorded step owns its arrays.
/// Fails with `ShapeMismatch` when R0 and A0 differ in shape.
pub fn evolve<N: NoiseSource + ?Sized>(
    r0: &DMatrix<f64>,
    a0: &DMatrix<f64>,
    time_points: &[f64],
    noise: &mut N,
) -> Result<Evolution> {
    if r0.shape() != a0.shape() {
        return Err(DialecticError::shape(
            format!("A0 shaped like R0 {:?}", r0.shape()),
            format!("{:?}", a0.shape()),
        ));
    }

    let (rows, cols) = r0.shape();
    let mut reality = r0.clone();
    let mut antireality = a0.clone();
    let mut evolution = Evolution {
        trajectory: Trajectory::default(),
        emergent: Vec::with_capacity(time_points.len()),
    };

    for &time in time_points {
        // Same draw on both sides
        let perturbation = DMatrix::from_fn(rows, cols, |_, _| noise.draw());

        let d_reality = &antireality - &reality + &perturbation;
        let d_antireality = &reality - &antireality + &perturbation;

        reality += d_reality;
        antireality += d_antireality;

        evolution.emergent.push(reality.component_mul(&antireality));
        evolution.trajectory.push(TrajectoryStep {
            time,
            reality: reality.clone(),
            antireality: antireality.clone(),
        });
    }

    debug!(
        steps = evolution.len(),
        shape = ?(rows, cols),
        noise_std = noise.std_dev(),
        noise_seed = noise.seed(),
        "Evolution complete"
    );

    Ok(evolution)
}

/// `num` evenly spaced points over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dialectic_env::{GaussianNoise, ZeroNoise, DEFAULT_NOISE_STD};
    use proptest::prelude::*;

    fn example_arrays() -> (DMatrix<f64>, DMatrix<f64>) {
        (
            DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]),
            DMatrix::from_row_slice(2, 2, &[0.5, 0.5, 0.2, 0.8]),
        )
    }

    /// Replays a fixed sequence of draws.
    struct ScriptedNoise(std::vec::IntoIter<f64>);

    impl NoiseSource for ScriptedNoise {
        fn draw(&mut self) -> f64 {
            self.0.next().unwrap_or(0.0)
        }
        fn std_dev(&self) -> f64 {
            0.0
        }
        fn seed(&self) -> u64 {
            0
        }
    }

    #[test]
    fn test_empty_time_points() {
        let (r0, a0) = example_arrays();
        let evolution = evolve(&r0, &a0, &[], &mut ZeroNoise).unwrap();

        assert!(evolution.is_empty());
        assert!(evolution.emergent.is_empty());
        assert!(evolution.last_emergent().is_none());
        assert_eq!(r0, example_arrays().0);
        assert_eq!(a0, example_arrays().1);
    }

    #[test]
    fn test_golden_two_steps_without_noise() {
        let (r0, a0) = example_arrays();
        let evolution = evolve(&r0, &a0, &[0.0, 1.0], &mut ZeroNoise).unwrap();

        assert_eq!(evolution.len(), 2);

        // Without noise R' = A and A' = R: the arrays swap every step.
        let step1 = &evolution.trajectory.steps()[0];
        assert_eq!(step1.time, 0.0);
        assert_eq!(step1.reality, a0);
        assert_eq!(step1.antireality, r0);

        let step2 = &evolution.trajectory.steps()[1];
        assert_eq!(step2.time, 1.0);
        assert_eq!(step2.reality, r0);
        assert_eq!(step2.antireality, a0);

        let expected = DMatrix::from_row_slice(2, 2, &[0.5, 0.0, 0.0, 0.8]);
        for emergent in &evolution.emergent {
            assert_eq!(*emergent, expected);
        }
        assert_eq!(step2.emergent(), expected);
    }

    #[test]
    fn test_shared_noise_draw() {
        // Column-major draw order: (0,0), (1,0), (0,1), (1,1)
        let r0 = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let a0 = DMatrix::from_row_slice(2, 2, &[0.5, 0.5, 0.2, 0.8]);
        let mut noise = ScriptedNoise(vec![0.1, -0.2, 0.3, 0.05].into_iter());

        let evolution = evolve(&r0, &a0, &[0.0], &mut noise).unwrap();
        let step = &evolution.trajectory.steps()[0];
        let n = DMatrix::from_row_slice(2, 2, &[0.1, 0.3, -0.2, 0.05]);

        let expected_r = &a0 + &n;
        let expected_a = &r0 + &n;
        for i in 0..4 {
            assert_relative_eq!(step.reality[i], expected_r[i], epsilon = 1e-12);
            assert_relative_eq!(step.antireality[i], expected_a[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_steps_are_owned_copies() {
        let (r0, a0) = example_arrays();
        let mut noise = GaussianNoise::new(3, DEFAULT_NOISE_STD).unwrap();
        let evolution = evolve(&r0, &a0, &linspace(0.0, 1.0, 5), &mut noise).unwrap();

        let steps = evolution.trajectory.steps();
        assert_ne!(steps[0].reality, steps[1].reality);
        assert_ne!(steps[3].antireality, steps[4].antireality);
    }

    #[test]
    fn test_shape_mismatch() {
        let r0 = DMatrix::<f64>::zeros(2, 2);
        let a0 = DMatrix::<f64>::zeros(3, 2);

        assert!(matches!(
            evolve(&r0, &a0, &[0.0], &mut ZeroNoise),
            Err(DialecticError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let (r0, a0) = example_arrays();
        let tp = linspace(0.0, 10.0, 20);
        let e1 = evolve(&r0, &a0, &tp, &mut GaussianNoise::new(11, 0.1).unwrap()).unwrap();
        let e2 = evolve(&r0, &a0, &tp, &mut GaussianNoise::new(11, 0.1).unwrap()).unwrap();

        assert_eq!(e1, e2);
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);

        let points = linspace(0.0, 10.0, 100);
        assert_eq!(points.len(), 100);
        assert_eq!(points[0], 0.0);
        assert_relative_eq!(points[99], 10.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_one_entry_per_time_point(n in 0usize..40, seed in any::<u64>()) {
            let (r0, a0) = example_arrays();
            let mut noise = GaussianNoise::new(seed, DEFAULT_NOISE_STD).unwrap();
            let evolution = evolve(&r0, &a0, &linspace(0.0, 1.0, n), &mut noise).unwrap();

            prop_assert_eq!(evolution.trajectory.len(), n);
            prop_assert_eq!(evolution.emergent.len(), n);
        }

        #[test]
        fn prop_shared_noise_cancels_in_difference(seed in any::<u64>(), n in 1usize..20) {
            // With one draw per element for both updates,
            // R_{t+1} - A_{t+1} = A_t - R_t whatever the draw.
            let (r0, a0) = example_arrays();
            let mut noise = GaussianNoise::new(seed, 1.0).unwrap();
            let evolution = evolve(&r0, &a0, &linspace(0.0, 1.0, n), &mut noise).unwrap();

            let mut prev_diff = &r0 - &a0;
            for step in evolution.trajectory.iter() {
                let diff = &step.reality - &step.antireality;
                for i in 0..diff.len() {
                    prop_assert!((diff[i] + prev_diff[i]).abs() < 1e-9);
                }
                prev_diff = diff;
            }
        }
    }
}
