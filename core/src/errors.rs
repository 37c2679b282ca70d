//! Error types for Zayra core operations

use thiserror::Error;

/// Main error type for Zayra core operations
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

/// Errors raised by record store backends
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Errors related to serving the API
#[derive(Error, Debug)]
pub enum PresentationError {
    #[error("Server startup failed: {0}")]
    StartupFailed(String),

    #[error("Server error: {0}")]
    ServeFailed(String),
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
