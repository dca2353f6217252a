//! Content blocks returned by tool invocations.

use serde::{Deserialize, Serialize};

/// One unit of a tool response.
///
/// Only text is interpreted by the orchestration layer. Everything else
/// (images, audio, embedded resources, links) is kept as `Other` so the
/// block order of a response survives intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    /// Raw text payload.
    Text { text: String },

    /// Any non-text block, tagged with the kind the server reported.
    Other { kind: String },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a non-text block of the given kind.
    pub fn other(kind: impl Into<String>) -> Self {
        Self::Other { kind: kind.into() }
    }

    /// The text payload, if this is a text block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other { .. } => None,
        }
    }

    /// Consume the block, keeping only a text payload.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text { text } => Some(text),
            Self::Other { .. } => None,
        }
    }
}

/// Keep the text payloads of `blocks`, in order.
pub fn text_payloads(blocks: Vec<ContentBlock>) -> impl Iterator<Item = String> {
    blocks.into_iter().filter_map(ContentBlock::into_text)
}
