//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while resolving or invoking remote tools.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The remote catalog does not offer the requested tool.
    #[error("Tool not found: {0}")]
    NotFound(String),

    /// The catalog could not be fetched over the session.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A tool call failed, either in transport or on the remote side.
    #[error("Invocation of '{tool}' failed: {message}")]
    Invocation { tool: String, message: String },
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a new invocation error for the given tool.
    pub fn invocation(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Invocation {
            tool: tool.into(),
            message: msg.into(),
        }
    }
}
