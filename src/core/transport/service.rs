//! Transport service - runs the inbound HTTP listener.

use tokio_util::sync::CancellationToken;
use tracing::info;

use super::TransportResult;
use super::config::HttpConfig;
use super::http::HttpTransport;
use crate::core::Gateway;

/// Transport service - manages the HTTP layer in front of the gateway.
pub struct TransportService {
    config: HttpConfig,
}

impl TransportService {
    /// Create a new transport service with the given configuration.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Serve `gateway` until `shutdown` is cancelled.
    pub async fn run(self, gateway: Gateway, shutdown: CancellationToken) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());
        HttpTransport::new(self.config).run(gateway, shutdown).await
    }
}
