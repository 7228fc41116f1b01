//! Error types for the feedback dashboard core
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Jujurly Error Enum ==
/// Unified error type for the crate.
///
/// Lookups never produce errors; only malformed configuration and caller
/// contract violations do.
#[derive(Error, Debug)]
pub enum JujurlyError {
    /// Cache, pagination or session configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Virtual window geometry is unusable (non-positive or non-finite)
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A command or call argument violates its contract
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Referenced feedback item does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the crate.
pub type Result<T> = std::result::Result<T, JujurlyError>;
