//! Error types for engine operations

use thiserror::Error;

/// Errors that can occur during relationship analysis
#[derive(Error, Debug)]
pub enum EngineError {
    /// The record store could not be read
    #[error("Record store error: {0}")]
    Store(String),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),
}
