//! Tool invocation.

use tracing::{debug, warn};

use super::content::{ContentBlock, text_payloads};
use super::error::ToolError;
use super::session::{JsonObject, ToolDescriptor, ToolSession};

/// Call `tool` with `arguments` and return its content blocks in server order.
///
/// Arguments are passed through unvalidated. Transport failures and
/// results the server flags as errors both surface as
/// [`ToolError::Invocation`]; nothing is retried here.
pub async fn invoke(
    session: &dyn ToolSession,
    tool: &ToolDescriptor,
    arguments: JsonObject,
) -> Result<Vec<ContentBlock>, ToolError> {
    debug!("Invoking {} with {} argument(s)", tool.name, arguments.len());

    let outcome = session
        .call_tool(&tool.name, arguments)
        .await
        .map_err(|e| match e {
            ToolError::Invocation { .. } => e,
            other => ToolError::invocation(&tool.name, other.to_string()),
        })?;

    if outcome.is_error {
        let message = text_payloads(outcome.content).collect::<Vec<_>>().join("\n");
        warn!("Tool {} reported an error: {}", tool.name, message);
        let message = if message.is_empty() {
            "remote tool reported an error".to_string()
        } else {
            message
        };
        return Err(ToolError::invocation(&tool.name, message));
    }

    debug!("{} returned {} content block(s)", tool.name, outcome.content.len());
    Ok(outcome.content)
}

/// Build a single-entry argument object.
pub fn single_argument(key: &str, value: impl Into<serde_json::Value>) -> JsonObject {
    let mut arguments = JsonObject::new();
    arguments.insert(key.to_string(), value.into());
    arguments
}
