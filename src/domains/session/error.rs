//! Session-specific error types.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while establishing a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The handshake with the remote endpoint failed.
    #[error("Failed to connect to {endpoint}: {message}")]
    Connect { endpoint: String, message: String },

    /// The handshake did not complete in time.
    #[error("Connecting to {endpoint} timed out after {timeout:?}")]
    Timeout { endpoint: String, timeout: Duration },
}

impl SessionError {
    /// Create a connect error.
    pub fn connect(endpoint: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connect {
            endpoint: endpoint.into(),
            message: msg.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            endpoint: endpoint.into(),
            timeout,
        }
    }
}
