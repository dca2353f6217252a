//! Session domain module.
//!
//! Owns the single long-lived connection to the remote tool server and
//! hands it out to every orchestration request.
//!
//! - `manager.rs` - Lazy, reconnecting owner of the shared session
//! - `mcp.rs` - rmcp-backed connector and session
//! - `error.rs` - Session-specific error types

mod error;
mod manager;
mod mcp;

pub use error::SessionError;
pub use manager::{Connector, SessionManager};
pub use mcp::{McpConnector, McpSession};
