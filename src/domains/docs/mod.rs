//! Documentation domain module.
//!
//! Orchestrates the remote search and fetch tools into the three
//! documentation operations the HTTP layer exposes.
//!
//! - `summary.rs` - Search hit model and parsing
//! - `locator.rs` - Locator normalization and deduplication
//! - `pipeline.rs` - Search, fetch and search-then-fetch over a session
//! - `service.rs` - Session binding, deadline and cancellation
//! - `error.rs` - Orchestration error type

mod error;
pub mod locator;
mod pipeline;
mod service;
mod summary;

pub use error::DocsError;
pub use locator::{Locator, canonical_key, distinct_locators};
pub use pipeline::{FetchOutcome, Pipeline};
pub use service::DocsService;
pub use summary::{DocumentSummary, parse_summaries};
