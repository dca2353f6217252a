//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

use crate::core::config::env_parse;

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Port number to listen on.
    pub port: u16,

    /// Host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Enable CORS for browser clients.
    #[serde(default = "default_cors")]
    pub enable_cors: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_cors() -> bool {
    true
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: default_host(),
            enable_cors: default_cors(),
        }
    }
}

impl HttpConfig {
    /// Load the listener config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let port = env_parse("DOCS_HTTP_PORT", defaults.port);
        let host = std::env::var("DOCS_HTTP_HOST").unwrap_or(defaults.host);
        let enable_cors = std::env::var("DOCS_HTTP_CORS")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(defaults.enable_cors);

        Self {
            port,
            host,
            enable_cors,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get a description of this listener for logging.
    pub fn description(&self) -> String {
        format!(
            "HTTP on {} (CORS {})",
            self.address(),
            if self.enable_cors { "enabled" } else { "disabled" }
        )
    }
}
