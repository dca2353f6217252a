//! Search and fetch orchestration over a tool session.
//!
//! `search_and_fetch` runs as a fixed sequence of stages:
//!
//! ```text
//! resolve both tools -> search -> (no hits: NotFound)
//!                               -> dedup locators -> fetch each -> collect
//! ```
//!
//! Fetches may run concurrently, but results are always reassembled in
//! locator discovery order.

use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use super::locator::distinct_locators;
use super::summary::{DocumentSummary, parse_summaries};
use crate::core::config::{FetchPolicy, OrchestrationConfig, ToolsConfig};
use crate::domains::tools::{
    ToolDescriptor, ToolError, ToolSession, invoke, resolve_tool, resolve_tools, single_argument,
    text_payloads,
};

/// Result of a search-then-fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Fetched text payloads, in locator discovery order.
    Found(Vec<String>),

    /// The search produced nothing to fetch.
    NotFound,
}

/// Tool names plus fan-out settings.
#[derive(Debug, Clone)]
pub struct Pipeline {
    search_tool: String,
    fetch_tool: String,
    policy: FetchPolicy,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(tools: &ToolsConfig, orchestration: &OrchestrationConfig) -> Self {
        Self {
            search_tool: tools.search_tool.clone(),
            fetch_tool: tools.fetch_tool.clone(),
            policy: orchestration.fetch_policy,
            concurrency: orchestration.fetch_concurrency.max(1),
        }
    }

    /// Override the fetch failure policy.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Override the number of fetches allowed in flight.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Run the search tool and parse its text blocks into summaries.
    pub async fn search(
        &self,
        session: &dyn ToolSession,
        query: &str,
    ) -> Result<Vec<DocumentSummary>, ToolError> {
        let tool = resolve_tool(session, &self.search_tool).await?;
        run_search(session, &tool, query).await
    }

    /// Fetch one document and return its first text block.
    pub async fn fetch(
        &self,
        session: &dyn ToolSession,
        url: &str,
    ) -> Result<Option<String>, ToolError> {
        let tool = resolve_tool(session, &self.fetch_tool).await?;
        let blocks = invoke(session, &tool, single_argument("url", url)).await?;
        Ok(text_payloads(blocks).next())
    }

    /// Search, then fetch every distinct locator the search returned.
    pub async fn search_and_fetch(
        &self,
        session: &dyn ToolSession,
        query: &str,
    ) -> Result<FetchOutcome, ToolError> {
        let tools = resolve_tools(
            session,
            &[self.search_tool.as_str(), self.fetch_tool.as_str()],
        )
        .await?;
        let search_tool = tools
            .get(&self.search_tool)
            .ok_or_else(|| ToolError::not_found(&self.search_tool))?;
        let fetch_tool = tools
            .get(&self.fetch_tool)
            .ok_or_else(|| ToolError::not_found(&self.fetch_tool))?;

        let summaries = run_search(session, search_tool, query).await?;
        if summaries.is_empty() {
            info!("Search for {:?} returned no documents", query);
            return Ok(FetchOutcome::NotFound);
        }

        let locators = distinct_locators(&summaries);
        info!(
            "Search returned {} summaries, {} distinct locators",
            summaries.len(),
            locators.len()
        );
        if locators.is_empty() {
            return Ok(FetchOutcome::NotFound);
        }

        let fetches = locators.into_iter().map(move |locator| async move {
            let result = invoke(
                session,
                fetch_tool,
                single_argument("url", locator.as_str()),
            )
            .await;
            (locator, result)
        });

        // `buffered` yields in submission order regardless of completion order.
        let mut results = stream::iter(fetches).buffered(self.concurrency);
        let mut texts = Vec::new();
        while let Some((locator, result)) = results.next().await {
            match result {
                Ok(blocks) => texts.extend(text_payloads(blocks)),
                Err(e) if self.policy == FetchPolicy::BestEffort => {
                    warn!("Skipping {} after failed fetch: {}", locator.as_str(), e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(FetchOutcome::Found(texts))
    }
}

async fn run_search(
    session: &dyn ToolSession,
    tool: &ToolDescriptor,
    query: &str,
) -> Result<Vec<DocumentSummary>, ToolError> {
    let blocks = invoke(session, tool, single_argument("query", query)).await?;

    let mut summaries = Vec::new();
    for (index, text) in text_payloads(blocks).enumerate() {
        match parse_summaries(&text) {
            Ok(parsed) => {
                debug!("Search block {} held {} summaries", index, parsed.len());
                summaries.extend(parsed);
            }
            Err(e) => warn!("Skipping unparseable search block {}: {}", index, e),
        }
    }

    Ok(summaries)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::domains::testing::{FakeSession, SEARCH, FETCH, fetched, search_hits};
    use crate::domains::tools::{CallOutcome, ContentBlock};

    fn pipeline() -> Pipeline {
        Pipeline::new(&ToolsConfig::default(), &OrchestrationConfig::default())
    }

    #[tokio::test]
    async fn test_search_concatenates_blocks_and_skips_malformed() {
        let session = FakeSession::docs().on_call(|_, _| {
            Ok(CallOutcome::success(vec![
                ContentBlock::text(json!([{"title": "one"}, {"title": "two"}]).to_string()),
                ContentBlock::text("not json"),
                ContentBlock::other("image"),
                ContentBlock::text(json!([{"title": "three"}]).to_string()),
            ]))
        });

        let summaries = pipeline().search(&session, "Azure Functions").await.unwrap();
        let titles: Vec<_> = summaries.iter().filter_map(|s| s.title.as_deref()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_search_without_content_is_empty() {
        let session = FakeSession::docs().on_call(|_, _| Ok(CallOutcome::success(vec![])));

        let summaries = pipeline().search(&session, "anything").await.unwrap();
        assert!(summaries.is_empty());
    }

    #[tokio::test]
    async fn test_search_missing_tool_never_invokes() {
        let session = FakeSession::new(&[FETCH]);

        let err = pipeline().search(&session, "Azure Functions").await.unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == SEARCH));
        assert_eq!(session.call_count(), 0);
    }

    #[tokio::test]
    async fn test_search_and_fetch_requires_both_tools_up_front() {
        let session = FakeSession::new(&[SEARCH]);

        let err = pipeline()
            .search_and_fetch(&session, "Azure Functions")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::NotFound(ref name) if name == FETCH));
        assert_eq!(session.call_count(), 0);
        assert_eq!(session.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_search_and_fetch_empty_search_is_not_found() {
        let session = FakeSession::docs().on_call(|_, _| search_hits(&[]));

        let outcome = pipeline().search_and_fetch(&session, "nothing").await.unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(session.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_and_fetch_without_locators_is_not_found() {
        let session = FakeSession::docs().on_call(|_, _| {
            Ok(CallOutcome::success(vec![ContentBlock::text(
                json!([{"title": "no link"}]).to_string(),
            )]))
        });

        let outcome = pipeline().search_and_fetch(&session, "q").await.unwrap();
        assert_eq!(outcome, FetchOutcome::NotFound);
        assert_eq!(session.call_count(), 1);
    }

    #[tokio::test]
    async fn test_search_and_fetch_dedups_locators() {
        let session = FakeSession::docs().on_call(|tool, args| match tool {
            SEARCH => search_hits(&["https://x/a", "https://x/a", "https://x/b"]),
            _ => fetched(args),
        });

        let outcome = pipeline()
            .search_and_fetch(&session, "Azure Functions")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Found(vec![
                "doc:https://x/a".to_string(),
                "doc:https://x/b".to_string(),
            ])
        );

        let fetched_urls: Vec<_> = session
            .calls()
            .into_iter()
            .filter(|(tool, _)| tool == FETCH)
            .filter_map(|(_, args)| args.get("url").and_then(|v| v.as_str()).map(str::to_string))
            .collect();
        assert_eq!(fetched_urls, vec!["https://x/a", "https://x/b"]);
    }

    #[tokio::test]
    async fn test_search_and_fetch_sends_query_argument() {
        let session = FakeSession::docs().on_call(|tool, args| match tool {
            SEARCH => search_hits(&["https://x/a"]),
            _ => fetched(args),
        });

        pipeline().search_and_fetch(&session, "Azure Functions").await.unwrap();

        let calls = session.calls();
        assert_eq!(calls[0].0, SEARCH);
        assert_eq!(calls[0].1.get("query"), Some(&json!("Azure Functions")));
    }

    #[tokio::test]
    async fn test_search_and_fetch_runs_on_spawned_task() {
        let session: Arc<dyn ToolSession> = Arc::new(FakeSession::docs().on_call(|tool, args| {
            match tool {
                SEARCH => search_hits(&["https://x/a", "https://x/b"]),
                _ => fetched(args),
            }
        }));
        let pipeline = pipeline().with_concurrency(2);

        let handle = tokio::spawn(async move {
            pipeline.search_and_fetch(session.as_ref(), "q").await
        });

        let outcome = handle.await.unwrap().unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Found(vec![
                "doc:https://x/a".to_string(),
                "doc:https://x/b".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_concurrent_fetches_keep_discovery_order() {
        let session = FakeSession::docs()
            .on_call(|tool, args| match tool {
                SEARCH => search_hits(&["https://x/slow", "https://x/medium", "https://x/fast"]),
                _ => fetched(args),
            })
            .with_latency(|args| match args.get("url").and_then(|v| v.as_str()) {
                Some("https://x/slow") => Duration::from_millis(60),
                Some("https://x/medium") => Duration::from_millis(30),
                _ => Duration::ZERO,
            });

        let outcome = pipeline()
            .with_concurrency(3)
            .search_and_fetch(&session, "q")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Found(vec![
                "doc:https://x/slow".to_string(),
                "doc:https://x/medium".to_string(),
                "doc:https://x/fast".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_strict_policy_aborts_on_failed_fetch() {
        let session = FakeSession::docs().on_call(|tool, args| match tool {
            SEARCH => search_hits(&["https://x/a", "https://x/broken", "https://x/c"]),
            _ if args.get("url") == Some(&json!("https://x/broken")) => {
                Ok(CallOutcome::failure(vec![ContentBlock::text("upstream 500")]))
            }
            _ => fetched(args),
        });

        let err = pipeline()
            .with_concurrency(1)
            .search_and_fetch(&session, "q")
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::Invocation { ref tool, .. } if tool == FETCH));
        // search, a, broken; c is never issued
        assert_eq!(session.call_count(), 3);
    }

    #[tokio::test]
    async fn test_best_effort_policy_skips_failed_fetch() {
        let session = FakeSession::docs().on_call(|tool, args| match tool {
            SEARCH => search_hits(&["https://x/a", "https://x/broken", "https://x/c"]),
            _ if args.get("url") == Some(&json!("https://x/broken")) => {
                Err(ToolError::connection("reset by peer"))
            }
            _ => fetched(args),
        });

        let outcome = pipeline()
            .with_policy(FetchPolicy::BestEffort)
            .search_and_fetch(&session, "q")
            .await
            .unwrap();
        assert_eq!(
            outcome,
            FetchOutcome::Found(vec![
                "doc:https://x/a".to_string(),
                "doc:https://x/c".to_string(),
            ])
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_first_text_block_with_one_call() {
        let session = FakeSession::docs().on_call(|_, _| {
            Ok(CallOutcome::success(vec![
                ContentBlock::other("image"),
                ContentBlock::text("first"),
                ContentBlock::text("second"),
            ]))
        });

        let text = pipeline().fetch(&session, "https://x/a").await.unwrap();
        assert_eq!(text.as_deref(), Some("first"));
        assert_eq!(session.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_without_text_is_none() {
        let session = FakeSession::docs()
            .on_call(|_, _| Ok(CallOutcome::success(vec![ContentBlock::other("audio")])));

        let text = pipeline().fetch(&session, "https://x/a").await.unwrap();
        assert_eq!(text, None);
    }
}
