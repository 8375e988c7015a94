//! Error types for the Dialectic engines.

use thiserror::Error;

/// Errors produced by sampling, evolution and the derived transforms.
///
/// Every variant is fatal to the computation that raised it; nothing is
/// retried or clamped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DialecticError {
    /// Two collections that must line up (states/amplitudes, R/A) cannot be reconciled
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// The probability mass to sample from sums to zero (or is not finite)
    #[error("Degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// A value fell outside the domain of a real-valued function
    #[error("Domain error: {0}")]
    DomainError(String),
}

impl DialecticError {
    /// Creates a shape mismatch error.
    pub fn shape(expected: impl std::fmt::Display, found: impl std::fmt::Display) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a degenerate distribution error.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateDistribution(msg.into())
    }

    /// Creates a domain error.
    pub fn domain(msg: impl Into<String>) -> Self {
        Self::DomainError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, DialecticError>;
