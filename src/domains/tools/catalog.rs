//! Tool catalog resolution.
//!
//! The catalog is fetched fresh for every resolution: one `list_tools`
//! round trip, then exact-name lookups against that snapshot.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::error::ToolError;
use super::session::{ToolDescriptor, ToolSession};

/// Resolve a single tool by exact name.
pub async fn resolve_tool(
    session: &dyn ToolSession,
    name: &str,
) -> Result<ToolDescriptor, ToolError> {
    let mut resolved = resolve_tools(session, &[name]).await?;
    resolved
        .remove(name)
        .ok_or_else(|| ToolError::not_found(name))
}

/// Resolve every name in `names` from one catalog snapshot.
///
/// Fails with the first missing name (in request order) if any is absent.
pub async fn resolve_tools(
    session: &dyn ToolSession,
    names: &[&str],
) -> Result<HashMap<String, ToolDescriptor>, ToolError> {
    let catalog = session.list_tools().await?;
    debug!("Catalog snapshot has {} tools", catalog.len());

    let mut by_name: HashMap<String, ToolDescriptor> = catalog
        .into_iter()
        .map(|tool| (tool.name.clone(), tool))
        .collect();

    let mut resolved = HashMap::with_capacity(names.len());
    for name in names {
        match by_name.remove(*name) {
            Some(tool) => {
                debug!(
                    "Resolved tool {} ({})",
                    tool.name,
                    tool.description.as_deref().unwrap_or("no description")
                );
                resolved.insert(tool.name.clone(), tool);
            }
            // Asking for the same name twice is not a miss.
            None if resolved.contains_key(*name) => {}
            None => {
                warn!("Tool '{}' is not offered by the remote server", name);
                return Err(ToolError::not_found(*name));
            }
        }
    }

    Ok(resolved)
}
