//! Error types for the Ising engine.

use thiserror::Error;

/// Errors surfaced by model construction and the simulation driver.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    /// Construction parameters failed validation (non-positive size or temperature, non-finite couplings).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A driving operation was asked for zero elementary steps.
    #[error("steps must be >= 1")]
    InvalidSteps,

    /// The sampled drive was configured with an unusable sample count.
    #[error("invalid sampling configuration: {0}")]
    InvalidSampling(String),

    /// `simulate` was called with a length that differs from the cached trajectory.
    #[error(
        "a trajectory of {cached} steps is already cached, {requested} were requested; call reset() first"
    )]
    TrajectoryLengthMismatch { cached: usize, requested: usize },
}

impl IsingError {
    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, IsingError>;
