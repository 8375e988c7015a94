//! Error types for the simulation harness.

use dialectic_core::DialecticError;
use dialectic_env::EnvError;
use thiserror::Error;

/// Errors that end a simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// An engine rejected its inputs
    #[error("Engine error: {0}")]
    Engine(#[from] DialecticError),

    /// The noise stream could not be built
    #[error("Environment error: {0}")]
    Environment(#[from] EnvError),

    /// The export file could not be written
    #[error("Export error: {0}")]
    Export(#[from] std::io::Error),
}
