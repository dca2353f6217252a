//! Domains module containing business logic organized by bounded contexts.
//!
//! - **session**: the shared connection to the remote tool server
//! - **tools**: catalog resolution and tool invocation
//! - **docs**: search and fetch orchestration built on the two above

pub mod docs;
pub mod session;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;
