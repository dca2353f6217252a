//! Error types for gateway startup.
//!
//! Domain errors (`DocsError`, `ToolError`, `SessionError`) stay typed up to
//! the HTTP layer, which maps them onto status codes. This type covers what
//! can stop the gateway from starting.

use thiserror::Error;

/// A specialized Result type for gateway operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that prevent the gateway from starting.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
