//! Error types for the Dialectic environment abstraction.

use thiserror::Error;

/// Errors that can occur while building an entropy source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EnvError {
    /// Noise distribution parameters were rejected (negative or non-finite std)
    #[error("Invalid noise parameters: {0}")]
    InvalidNoise(String),
}

impl EnvError {
    /// Creates an invalid-noise error.
    pub fn invalid_noise(msg: impl Into<String>) -> Self {
        Self::InvalidNoise(msg.into())
    }
}
