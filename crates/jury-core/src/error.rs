//! # Error Types
//!
//! Top-level error type for the jury roster workspace. Domain crates keep
//! their own structured errors and convert into `JuryError` at crate
//! boundaries, carrying the rendered message.

use thiserror::Error;

/// Top-level error type for the jury roster.
#[derive(Error, Debug)]
pub enum JuryError {
    /// Input could not be parsed into a domain value.
    #[error("parse error: {0}")]
    Parse(String),

    /// A roster operation was rejected by policy or by an invariant.
    #[error("operation rejected: {0}")]
    Rejected(String),

    /// Initial load of positions or officials failed.
    #[error("load failed: {0}")]
    Load(String),

    /// The persistence service refused the submitted batch, or submission was blocked.
    #[error("submission failed: {0}")]
    Submission(String),
}
