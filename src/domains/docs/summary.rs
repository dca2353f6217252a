//! Document summaries returned by the search tool.

use serde::{Deserialize, Serialize};

/// One search hit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    #[serde(default)]
    pub title: Option<String>,

    /// Body excerpt.
    #[serde(default)]
    pub content: Option<String>,

    /// Locator for a follow-up fetch.
    #[serde(default, rename = "contentUrl")]
    pub content_url: Option<String>,
}

/// Accepted shapes of a search text block.
#[derive(Deserialize)]
#[serde(untagged)]
enum SearchPayload {
    List(Vec<DocumentSummary>),
    Wrapped { results: Vec<DocumentSummary> },
}

/// Parse one text block as a list of summaries.
///
/// Accepts a bare JSON array or an object with a `results` array.
pub fn parse_summaries(text: &str) -> Result<Vec<DocumentSummary>, serde_json::Error> {
    let payload: SearchPayload = serde_json::from_str(text)?;
    Ok(match payload {
        SearchPayload::List(summaries) => summaries,
        SearchPayload::Wrapped { results } => results,
    })
}
