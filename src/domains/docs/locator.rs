//! Locator normalization and deduplication.
//!
//! Two locators are the same document when their canonical keys match.
//! The key is the parsed URL with the fragment removed, default ports
//! dropped, scheme and host lowercased, and a single trailing `/` removed
//! from non-root paths. Query strings are compared verbatim. Strings that
//! do not parse as absolute URLs fall back to their trimmed text.

use std::collections::HashSet;

use reqwest::Url;

use super::summary::DocumentSummary;

/// A locator as first seen, plus its canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    raw: String,
    key: String,
}

impl Locator {
    /// Build a locator from `raw`. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        Some(Self {
            raw: raw.to_string(),
            key: canonical_key(raw),
        })
    }

    /// The locator text to send to the fetch tool.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The canonical key used for deduplication.
    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Canonical form of `raw` used for equality.
pub fn canonical_key(raw: &str) -> String {
    let raw = raw.trim();
    let Ok(mut url) = Url::parse(raw) else {
        return raw.to_string();
    };

    url.set_fragment(None);

    let path = url.path();
    if path.len() > 1 && path.ends_with('/') {
        let trimmed = path[..path.len() - 1].to_string();
        url.set_path(&trimmed);
    }

    url.to_string()
}

/// Distinct locators of `summaries`, in first-seen order.
///
/// Summaries without a locator are skipped.
pub fn distinct_locators(summaries: &[DocumentSummary]) -> Vec<Locator> {
    let mut seen = HashSet::new();
    summaries
        .iter()
        .filter_map(|summary| summary.content_url.as_deref())
        .filter_map(Locator::parse)
        .filter(|locator| seen.insert(locator.key.clone()))
        .collect()
}
