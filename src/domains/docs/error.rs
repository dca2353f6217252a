//! Documentation orchestration errors.

use std::time::Duration;

use thiserror::Error;

use crate::domains::session::SessionError;
use crate::domains::tools::ToolError;

/// Errors that end a documentation request.
#[derive(Debug, Error)]
pub enum DocsError {
    /// The shared session could not be established.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Tool resolution or invocation failed.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The request was cancelled before it completed.
    #[error("Request cancelled")]
    Cancelled,

    /// The request ran past its deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl DocsError {
    /// The remote catalog lacks a tool this request needs.
    pub fn missing_tool(&self) -> Option<&str> {
        match self {
            Self::Tool(ToolError::NotFound(name)) => Some(name),
            _ => None,
        }
    }
}
