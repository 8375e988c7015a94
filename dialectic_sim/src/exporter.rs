//! JSON exporter for simulation runs.
//!
//! Writes the full trajectory and every derived quantity so a run can be
//! inspected or plotted outside Rust.

use crate::world::RunReport;
use dialectic_core::Coevolution;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;

/// One evolution step, arrays as row lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepFrame {
    /// Time point of the step
    pub time: f64,

    pub reality: Vec<Vec<f64>>,
    pub antireality: Vec<Vec<f64>>,

    /// R ∘ A at this step
    pub emergent: Vec<Vec<f64>>,
}

/// Complete run export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimExport {
    /// Seed used
    pub seed: u64,

    /// Noise standard deviation
    pub noise_std: f64,

    /// Sampled state label
    pub observed_state: String,

    /// State count exceeded axiom count
    pub godel_limited: bool,

    /// All steps
    pub steps: Vec<StepFrame>,

    /// Square root of the last emergent value (NaN exported as null)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consciousness: Option<Vec<Vec<Option<f64>>>>,

    /// Number of NaN entries in `consciousness`
    pub domain_violations: usize,

    /// Outer product of final R and A
    pub synthesis: Vec<Vec<f64>>,

    /// Co-evolved minds and their shared trace
    pub coevolution: Coevolution,
}

impl SimExport {
    /// Builds the export from a finished run.
    pub fn from_report(report: &RunReport, noise_std: f64) -> Self {
        let steps = report
            .evolution
            .trajectory
            .iter()
            .zip(&report.evolution.emergent)
            .map(|(step, emergent)| StepFrame {
                time: step.time,
                reality: rows(&step.reality),
                antireality: rows(&step.antireality),
                emergent: rows(emergent),
            })
            .collect();

        let consciousness = report.consciousness.as_ref().map(|m| {
            rows(m)
                .into_iter()
                .map(|row| row.into_iter().map(|v| (!v.is_nan()).then_some(v)).collect())
                .collect()
        });

        Self {
            seed: report.seed,
            noise_std,
            observed_state: report.observed_state.clone(),
            godel_limited: report.godel_limited,
            steps,
            consciousness,
            domain_violations: report.domain_violations,
            synthesis: rows(&report.synthesis),
            coevolution: report.coevolution.clone(),
        }
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Writes to a JSON file.
    pub fn write_to_file(&self, path: &str) -> std::io::Result<()> {
        let json = self.to_json()?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}

/// Matrix as a list of rows.
fn rows(matrix: &DMatrix<f64>) -> Vec<Vec<f64>> {
    matrix
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect()
}
