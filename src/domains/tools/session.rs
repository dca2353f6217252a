//! The seam between orchestration logic and a live tool server.
//!
//! Everything above this trait (catalog lookup, invocation, aggregation)
//! works against `dyn ToolSession`, so the MCP client and in-memory test
//! sessions are interchangeable.

use serde::{Deserialize, Serialize};

use super::content::ContentBlock;
use super::error::ToolError;

/// Tool arguments: a JSON object of named values.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// An entry in the remote tool catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, unique within one catalog snapshot.
    pub name: String,

    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Argument schema. Opaque to this crate.
    #[serde(default, rename = "inputSchema")]
    pub input_schema: JsonObject,
}

impl ToolDescriptor {
    /// Create a descriptor with an empty argument schema.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            input_schema: JsonObject::new(),
        }
    }
}

/// Raw result of one tool call, before error interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallOutcome {
    /// Content blocks in the order the server returned them.
    pub content: Vec<ContentBlock>,

    /// Whether the server flagged the call as a tool-level failure.
    pub is_error: bool,
}

impl CallOutcome {
    /// A successful outcome carrying `content`.
    pub fn success(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: false,
        }
    }

    /// A tool-level failure carrying `content` as the error description.
    pub fn failure(content: Vec<ContentBlock>) -> Self {
        Self {
            content,
            is_error: true,
        }
    }
}

/// An established connection to a tool server.
///
/// Implementations must tolerate concurrent calls from many requests.
#[async_trait::async_trait]
pub trait ToolSession: Send + Sync {
    /// Fetch the full tool catalog in one round trip.
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError>;

    /// Call `name` with `arguments`.
    ///
    /// Transport failures are returned as errors; a tool-level failure
    /// reported by the server comes back as `CallOutcome { is_error: true }`.
    async fn call_tool(&self, name: &str, arguments: JsonObject)
    -> Result<CallOutcome, ToolError>;

    /// Whether the session can still carry requests.
    fn is_healthy(&self) -> bool {
        true
    }
}
