//! Error types for RTL Helper.

use thiserror::Error;

/// Main error type for RTL Helper operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Node id does not resolve (freed or never existed)
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    /// Operation requires an element but the node is text
    #[error("Not an element: {0}")]
    NotAnElement(String),

    /// Node cannot be inserted at the requested position
    #[error("Hierarchy error: {0}")]
    Hierarchy(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Engine construction failed
    #[error("Initialization failed: {0}")]
    InitFailed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{0}")]
    Other(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
