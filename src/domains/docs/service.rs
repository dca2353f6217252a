//! Documentation service.
//!
//! Binds the shared session to the search/fetch pipeline and enforces the
//! per-request deadline and cancellation. When either fires, outstanding
//! tool calls are dropped and the caller gets `Cancelled` or `Timeout`,
//! never a partial result.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

use super::error::DocsError;
use super::pipeline::{FetchOutcome, Pipeline};
use super::summary::DocumentSummary;
use crate::core::config::Config;
use crate::domains::session::SessionManager;

/// Entry point for the three documentation operations.
pub struct DocsService {
    sessions: Arc<SessionManager>,
    pipeline: Pipeline,
    timeout: Duration,
}

impl DocsService {
    pub fn new(sessions: Arc<SessionManager>, pipeline: Pipeline, timeout: Duration) -> Self {
        info!("Initializing DocsService");
        Self {
            sessions,
            pipeline,
            timeout,
        }
    }

    /// Build the service from configuration.
    pub fn from_config(sessions: Arc<SessionManager>, config: &Config) -> Self {
        Self::new(
            sessions,
            Pipeline::new(&config.tools, &config.orchestration),
            config.orchestration.request_timeout(),
        )
    }

    /// Search for documents matching `query`.
    #[instrument(skip(self, cancel))]
    pub async fn search(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<DocumentSummary>, DocsError> {
        self.guarded(cancel, async {
            let session = self.sessions.session().await?;
            Ok::<_, DocsError>(self.pipeline.search(session.as_ref(), query).await?)
        })
        .await
    }

    /// Fetch a single document by locator.
    #[instrument(skip(self, cancel))]
    pub async fn fetch(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<String>, DocsError> {
        self.guarded(cancel, async {
            let session = self.sessions.session().await?;
            Ok::<_, DocsError>(self.pipeline.fetch(session.as_ref(), url).await?)
        })
        .await
    }

    /// Search for `query`, then fetch every distinct hit.
    #[instrument(skip(self, cancel))]
    pub async fn search_and_fetch(
        &self,
        query: &str,
        cancel: &CancellationToken,
    ) -> Result<FetchOutcome, DocsError> {
        self.guarded(cancel, async {
            let session = self.sessions.session().await?;
            Ok::<_, DocsError>(self.pipeline.search_and_fetch(session.as_ref(), query).await?)
        })
        .await
    }

    async fn guarded<T, F>(&self, cancel: &CancellationToken, work: F) -> Result<T, DocsError>
    where
        F: Future<Output = Result<T, DocsError>>,
    {
        tokio::select! {
            _ = cancel.cancelled() => Err(DocsError::Cancelled),
            result = tokio::time::timeout(self.timeout, work) => {
                result.unwrap_or(Err(DocsError::Timeout(self.timeout)))
            }
        }
    }
}
