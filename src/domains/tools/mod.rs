//! Tools domain module.
//!
//! Client-side handling of remote MCP tools: discovering them from the
//! server's catalog and invoking them over a shared session.
//!
//! ## Architecture
//!
//! - `session.rs` - The `ToolSession` trait every backend implements
//! - `catalog.rs` - Name to descriptor resolution against a catalog snapshot
//! - `invoker.rs` - Tool calls and remote error interpretation
//! - `content.rs` - Content block model
//! - `error.rs` - Tool-specific error types

pub mod catalog;
mod content;
mod error;
pub mod invoker;
mod session;

pub use catalog::{resolve_tool, resolve_tools};
pub use content::{ContentBlock, text_payloads};
pub use error::ToolError;
pub use invoker::{invoke, single_argument};
pub use session::{CallOutcome, JsonObject, ToolDescriptor, ToolSession};
