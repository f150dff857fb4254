//! Unified error types for the echo backend.

use thiserror::Error;

/// Unified error type for the echo backend.
///
/// The resolution logic itself is total and never fails; errors only
/// arise at the process boundary (configuration, socket setup).
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error (socket bind, serve).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
