//! Process-wide session ownership.
//!
//! The `SessionManager` hands every request the same live session. The
//! first caller pays for the handshake; later callers get the cached
//! handle. A failed handshake leaves the slot empty, and a session that
//! reports itself unhealthy is dropped and replaced on the next call.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use super::error::SessionError;
use crate::domains::tools::ToolSession;

/// Establishes new sessions against a fixed endpoint.
#[async_trait::async_trait]
pub trait Connector: Send + Sync {
    /// Perform the handshake and return a ready session.
    async fn connect(&self) -> Result<Arc<dyn ToolSession>, SessionError>;

    /// Human-readable endpoint identity, for logs.
    fn endpoint(&self) -> &str;
}

/// Owner of the shared session.
pub struct SessionManager {
    connector: Arc<dyn Connector>,

    /// Held across the handshake so concurrent first callers wait for a
    /// single connection attempt instead of racing their own.
    slot: Mutex<Option<Arc<dyn ToolSession>>>,
}

impl SessionManager {
    /// Create a manager. No connection is made until [`session`](Self::session).
    pub fn new(connector: Arc<dyn Connector>) -> Self {
        Self {
            connector,
            slot: Mutex::new(None),
        }
    }

    /// Return the shared session, establishing it if needed.
    pub async fn session(&self) -> Result<Arc<dyn ToolSession>, SessionError> {
        let mut slot = self.slot.lock().await;

        if let Some(session) = slot.as_ref() {
            if session.is_healthy() {
                return Ok(Arc::clone(session));
            }
            warn!(
                "Session to {} is no longer usable, reconnecting",
                self.connector.endpoint()
            );
            *slot = None;
        }

        info!("Connecting to {}", self.connector.endpoint());
        let session = self.connector.connect().await?;
        info!("Session established with {}", self.connector.endpoint());

        *slot = Some(Arc::clone(&session));
        Ok(session)
    }

    /// Whether a session is currently cached.
    pub async fn is_connected(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
