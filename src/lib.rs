//! Documentation MCP Gateway Library
//!
//! This crate exposes documentation search and retrieval over HTTP, backed
//! by one long-lived Model Context Protocol (MCP) client session to a
//! remote documentation server.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the shared `Gateway` and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **session**: the lazily established, reconnecting shared session
//!   - **tools**: remote tool catalog resolution and invocation
//!   - **docs**: search, locator deduplication and fetch fan-out
//!
//! # Example
//!
//! ```rust,no_run
//! use docs_mcp_gateway::{Config, Gateway};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let gateway = Gateway::new(Config::from_env());
//!     let hits = gateway
//!         .docs()
//!         .search("Azure Functions", &CancellationToken::new())
//!         .await?;
//!     println!("{} results", hits.len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, Gateway, Result};
