//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the gateway,
//! including error handling, configuration, the shared gateway object,
//! and the HTTP transport.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::Gateway;
pub use transport::{HttpConfig, TransportService};
