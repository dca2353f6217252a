//! Gateway service object and lifecycle management.
//!
//! The `Gateway` is constructed once in `main` and shared with every HTTP
//! handler. It owns the session manager (and through it the one live
//! connection to the remote tool server) and the documentation service
//! built on top of it.

use std::sync::Arc;

use tracing::info;

use super::config::Config;
use crate::domains::docs::DocsService;
use crate::domains::session::{Connector, McpConnector, SessionManager};

/// Shared application service.
#[derive(Clone)]
pub struct Gateway {
    config: Arc<Config>,
    docs: Arc<DocsService>,
}

impl Gateway {
    /// Create a gateway that connects to the configured MCP endpoint.
    pub fn new(config: Config) -> Self {
        let connector = Arc::new(McpConnector::new(config.remote.clone()));
        Self::with_connector(config, connector)
    }

    /// Create a gateway over an arbitrary connector.
    pub fn with_connector(config: Config, connector: Arc<dyn Connector>) -> Self {
        info!(
            "Remote endpoint: {} ({})",
            config.remote.name, config.remote.endpoint
        );

        let sessions = Arc::new(SessionManager::new(connector));
        let docs = Arc::new(DocsService::from_config(sessions, &config));

        Self {
            config: Arc::new(config),
            docs,
        }
    }

    /// Get the service name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the service version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the gateway configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the documentation service.
    pub fn docs(&self) -> &DocsService {
        &self.docs
    }
}
