//! HTTP transport implementation.
//!
//! Exposes the three documentation operations as GET endpoints:
//!
//! - `GET /api/search-doc-by-query?query=...` - search hits as JSON
//! - `GET /api/fetch-doc-by-url?url=...` - one document as plain text
//! - `GET /api/fetch-doc-by-query?query=...` - every distinct hit, fetched
//!
//! Missing or blank parameters are rejected before any call to the remote
//! server is made.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::Gateway;
use crate::domains::docs::{DocsError, DocumentSummary, FetchOutcome};

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    gateway: Gateway,

    /// Parent of every request's cancellation token; cancelled on shutdown.
    shutdown: CancellationToken,
}

impl AppState {
    pub fn new(gateway: Gateway, shutdown: CancellationToken) -> Self {
        Self { gateway, shutdown }
    }
}

/// Query-string parameters of the query-driven endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    pub query: Option<String>,
}

/// Query-string parameters of the fetch-by-url endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct UrlParams {
    #[serde(default)]
    pub url: Option<String>,
}

/// Client-facing failure of a documentation request.
///
/// Messages are safe summaries; upstream detail only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("No documents found")]
    NotFound,

    #[error("The documentation server request failed")]
    Upstream,

    #[error("The documentation server did not respond in time")]
    Timeout,

    #[error("The request was cancelled")]
    Cancelled,
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
            Self::Cancelled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<DocsError> for ApiError {
    fn from(err: DocsError) -> Self {
        if let Some(tool) = err.missing_tool() {
            warn!("Remote server is missing tool '{}'", tool);
            return Self::BadRequest(format!(
                "The documentation server does not offer the '{}' tool",
                tool
            ));
        }

        match err {
            DocsError::Cancelled => Self::Cancelled,
            DocsError::Timeout(after) => {
                warn!("Documentation request timed out after {:?}", after);
                Self::Timeout
            }
            other => {
                error!("Documentation request failed: {}", other);
                Self::Upstream
            }
        }
    }
}

/// Trimmed value of a required parameter.
fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Missing required parameter '{}'", name)))
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport until `shutdown` is cancelled.
    pub async fn run(self, gateway: Gateway, shutdown: CancellationToken) -> TransportResult<()> {
        let addr = self.config.address();

        let app = router(
            AppState::new(gateway, shutdown.clone()),
            self.config.enable_cors,
        );

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {}", self.config.description());
        info!("  → Search:         GET /api/search-doc-by-query?query=");
        info!("  → Fetch by URL:   GET /api/fetch-doc-by-url?url=");
        info!("  → Fetch by query: GET /api/fetch-doc-by-query?query=");
        info!("  → Health:         GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the router over `state`.
pub fn router(state: AppState, enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/api/search-doc-by-query", get(search_doc_by_query))
        .route("/api/fetch-doc-by-url", get(fetch_doc_by_url))
        .route("/api/fetch-doc-by-query", get(fetch_doc_by_query))
        .route("/health", get(health_check))
        .route("/", get(root_handler))
        .with_state(state);

    if enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app.layer(TraceLayer::new_for_http())
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let remote = &state.gateway.config().remote;
    Json(serde_json::json!({
        "name": state.gateway.name(),
        "version": state.gateway.version(),
        "remote": {
            "name": remote.name,
            "endpoint": remote.endpoint,
            "transport": remote.transport.as_str()
        },
        "endpoints": {
            "searchDocByQuery": "/api/search-doc-by-query?query=",
            "fetchDocByUrl": "/api/fetch-doc-by-url?url=",
            "fetchDocByQuery": "/api/fetch-doc-by-query?query=",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[instrument(skip_all)]
async fn search_doc_by_query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let query = required(params.query, "query")?;
    info!("SearchDocByQuery: {:?}", query);

    let cancel = state.shutdown.child_token();
    let summaries = state.gateway.docs().search(&query, &cancel).await?;
    if summaries.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(summaries))
}

#[instrument(skip_all)]
async fn fetch_doc_by_url(
    State(state): State<AppState>,
    Query(params): Query<UrlParams>,
) -> Result<String, ApiError> {
    let url = required(params.url, "url")?;
    info!("FetchDocByUrl: {}", url);

    let cancel = state.shutdown.child_token();
    state
        .gateway
        .docs()
        .fetch(&url, &cancel)
        .await?
        .ok_or(ApiError::NotFound)
}

#[instrument(skip_all)]
async fn fetch_doc_by_query(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Vec<String>>, ApiError> {
    let query = required(params.query, "query")?;
    info!("FetchDocByQuery: {:?}", query);

    let cancel = state.shutdown.child_token();
    match state.gateway.docs().search_and_fetch(&query, &cancel).await? {
        FetchOutcome::Found(texts) => Ok(Json(texts)),
        FetchOutcome::NotFound => Err(ApiError::NotFound),
    }
}
