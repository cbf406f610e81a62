//! Error types for the sandbox core.
//!
//! Every configuration boundary returns [`Result`]; a rejected call leaves the
//! previous valid state untouched.

use thiserror::Error;

/// Errors raised when configuration or construction input is out of range.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SandboxError {
    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),
    #[error("coefficient of restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f32),
    #[error("gravitational field strength cannot be negative, got {0}")]
    InvalidGravity(f32),
    #[error("air density cannot be negative, got {0}")]
    InvalidAirDensity(f32),
    #[error("mass must be positive and finite, got {0}")]
    InvalidMass(f32),
    #[error("{name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f32 },
    #[error("arena bounds must be positive, got {width}x{height}")]
    InvalidBounds { width: f32, height: f32 },
    #[error("sample buffer capacity must be at least 1")]
    InvalidCapacity,
    #[error("graph scale must be positive and finite, got {0}")]
    InvalidScale(f32),
    #[error("body index {index} out of range (count: {count})")]
    BodyOutOfRange { index: usize, count: usize },
}

/// Convenient Result alias for sandbox operations.
pub type Result<T> = std::result::Result<T, SandboxError>;
