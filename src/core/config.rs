//! Configuration management for the gateway.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables or defaults. The remote endpoint
//! identity is fixed here and never taken from requests.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::{self, Error};
use super::transport::HttpConfig;

/// Main configuration structure for the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Service identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Remote MCP server the session connects to.
    pub remote: RemoteConfig,

    /// Names of the remote tools the orchestrations use.
    pub tools: ToolsConfig,

    /// Fan-out, failure policy and deadlines.
    pub orchestration: OrchestrationConfig,

    /// Inbound HTTP listener configuration.
    pub transport: HttpConfig,
}

/// Service identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name reported on the info endpoint.
    pub name: String,

    /// The version of the service.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "docs-mcp-gateway".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// How the session talks to the remote server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    /// MCP streamable HTTP.
    #[default]
    StreamableHttp,
}

impl TransportMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StreamableHttp => "streamable-http",
        }
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streamable-http" | "streamable_http" | "streamablehttp" | "http" => {
                Ok(Self::StreamableHttp)
            }
            other => Err(format!("unsupported transport mode '{}'", other)),
        }
    }
}

/// Identity of the remote MCP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Display name of the endpoint.
    pub name: String,

    /// Endpoint URI.
    pub endpoint: String,

    /// Transport used for the session.
    pub transport: TransportMode,

    /// Handshake timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl RemoteConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            name: "Microsoft Learn MCP Server".to_string(),
            endpoint: "https://learn.microsoft.com/api/mcp".to_string(),
            transport: TransportMode::StreamableHttp,
            connect_timeout_secs: 30,
        }
    }
}

/// Remote tool names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Tool taking `{query}` and returning document summaries.
    pub search_tool: String,

    /// Tool taking `{url}` and returning the document text.
    pub fetch_tool: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            search_tool: "microsoft_docs_search".to_string(),
            fetch_tool: "microsoft_docs_fetch".to_string(),
        }
    }
}

/// What a search-then-fetch does when one fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FetchPolicy {
    /// Abort the whole operation on the first failed fetch.
    #[default]
    Strict,

    /// Skip failed fetches and return the rest.
    BestEffort,
}

impl FromStr for FetchPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "strict" => Ok(Self::Strict),
            "best-effort" | "besteffort" => Ok(Self::BestEffort),
            other => Err(format!("unknown fetch policy '{}'", other)),
        }
    }
}

/// Orchestration tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestrationConfig {
    pub fetch_policy: FetchPolicy,

    /// Maximum fetches in flight per request. 1 means sequential.
    pub fetch_concurrency: usize,

    /// Deadline for one whole orchestration, in seconds.
    pub request_timeout_secs: u64,
}

impl OrchestrationConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for OrchestrationConfig {
    fn default() -> Self {
        Self {
            fetch_policy: FetchPolicy::Strict,
            fetch_concurrency: 4,
            request_timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `DOCS_`.
    /// For example: `DOCS_REMOTE_ENDPOINT`, `DOCS_LOG_LEVEL`.
    /// Values that fail to parse keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("DOCS_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("DOCS_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(name) = std::env::var("DOCS_REMOTE_NAME") {
            config.remote.name = name;
        }

        if let Ok(endpoint) = std::env::var("DOCS_REMOTE_ENDPOINT") {
            info!("Remote endpoint overridden: {}", endpoint);
            config.remote.endpoint = endpoint;
        }

        config.remote.transport = env_parse("DOCS_REMOTE_TRANSPORT", config.remote.transport);
        config.remote.connect_timeout_secs =
            env_parse("DOCS_CONNECT_TIMEOUT_SECS", config.remote.connect_timeout_secs);

        if let Ok(tool) = std::env::var("DOCS_SEARCH_TOOL") {
            config.tools.search_tool = tool;
        }

        if let Ok(tool) = std::env::var("DOCS_FETCH_TOOL") {
            config.tools.fetch_tool = tool;
        }

        config.orchestration.fetch_policy =
            env_parse("DOCS_FETCH_POLICY", config.orchestration.fetch_policy);
        config.orchestration.fetch_concurrency =
            env_parse("DOCS_FETCH_CONCURRENCY", config.orchestration.fetch_concurrency).max(1);
        config.orchestration.request_timeout_secs = env_parse(
            "DOCS_REQUEST_TIMEOUT_SECS",
            config.orchestration.request_timeout_secs,
        );

        config.transport = HttpConfig::from_env();

        config
    }

    /// Reject configurations the gateway cannot run with.
    pub fn validate(&self) -> error::Result<()> {
        reqwest::Url::parse(&self.remote.endpoint).map_err(|e| {
            Error::config(format!(
                "remote endpoint '{}' is not a valid URL: {}",
                self.remote.endpoint, e
            ))
        })?;

        if self.tools.search_tool.trim().is_empty() || self.tools.fetch_tool.trim().is_empty() {
            return Err(Error::config("search and fetch tool names must not be empty"));
        }

        if self.remote.connect_timeout_secs == 0 || self.orchestration.request_timeout_secs == 0 {
            return Err(Error::config("timeouts must be at least one second"));
        }

        Ok(())
    }
}

/// Read and parse `key`, keeping `default` when unset or invalid.
pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|e| {
            warn!("Ignoring invalid {}={:?}: {}", key, value, e);
            default
        }),
        Err(_) => default,
    }
}
