//! Transport layer for the gateway.
//!
//! Inbound requests arrive over HTTP (axum). Each handler validates its
//! parameters, delegates to the documentation service, and maps the
//! outcome onto a status code.

mod config;
mod error;
pub mod http;
mod service;

pub use config::HttpConfig;
pub use error::{TransportError, TransportResult};
pub use http::{ApiError, AppState, router};
pub use service::TransportService;
