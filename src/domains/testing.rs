//! In-memory sessions and connectors for unit tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::json;

use crate::domains::session::{Connector, SessionError};
use crate::domains::tools::{
    CallOutcome, ContentBlock, JsonObject, ToolDescriptor, ToolError, ToolSession,
};

pub const SEARCH: &str = "microsoft_docs_search";
pub const FETCH: &str = "microsoft_docs_fetch";

type Responder = dyn Fn(&str, &JsonObject) -> Result<CallOutcome, ToolError> + Send + Sync;
type Latency = dyn Fn(&JsonObject) -> Duration + Send + Sync;

/// Scripted tool session that records every call.
pub struct FakeSession {
    tools: Vec<ToolDescriptor>,
    catalog_error: Option<String>,
    responder: Box<Responder>,
    latency: Option<Box<Latency>>,
    list_calls: AtomicUsize,
    calls: Mutex<Vec<(String, JsonObject)>>,
    healthy: AtomicBool,
}

impl FakeSession {
    pub fn new(tools: &[&str]) -> Self {
        Self {
            tools: tools
                .iter()
                .map(|name| ToolDescriptor::new(*name, Some(format!("{name} (fake)"))))
                .collect(),
            catalog_error: None,
            responder: Box::new(|_, _| Ok(CallOutcome::success(vec![]))),
            latency: None,
            list_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
            healthy: AtomicBool::new(true),
        }
    }

    /// A session offering both documentation tools.
    pub fn docs() -> Self {
        Self::new(&[SEARCH, FETCH])
    }

    pub fn on_call<F>(mut self, responder: F) -> Self
    where
        F: Fn(&str, &JsonObject) -> Result<CallOutcome, ToolError> + Send + Sync + 'static,
    {
        self.responder = Box::new(responder);
        self
    }

    pub fn with_latency<F>(mut self, latency: F) -> Self
    where
        F: Fn(&JsonObject) -> Duration + Send + Sync + 'static,
    {
        self.latency = Some(Box::new(latency));
        self
    }

    pub fn failing_catalog(mut self, message: &str) -> Self {
        self.catalog_error = Some(message.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<(String, JsonObject)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mark_unhealthy(&self) {
        self.healthy.store(false, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl ToolSession for FakeSession {
    async fn list_tools(&self) -> Result<Vec<ToolDescriptor>, ToolError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        match &self.catalog_error {
            Some(message) => Err(ToolError::connection(message.clone())),
            None => Ok(self.tools.clone()),
        }
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: JsonObject,
    ) -> Result<CallOutcome, ToolError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments.clone()));

        if let Some(latency) = &self.latency {
            let delay = latency(&arguments);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        (self.responder)(name, &arguments)
    }

    fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// A search response whose single text block lists `urls`.
pub fn search_hits(urls: &[&str]) -> Result<CallOutcome, ToolError> {
    let hits: Vec<_> = urls
        .iter()
        .enumerate()
        .map(|(i, url)| json!({"title": format!("Result {i}"), "content": "excerpt", "contentUrl": url}))
        .collect();
    Ok(CallOutcome::success(vec![ContentBlock::text(
        serde_json::Value::Array(hits).to_string(),
    )]))
}

/// A fetch response echoing the requested url as `doc:<url>`.
pub fn fetched(arguments: &JsonObject) -> Result<CallOutcome, ToolError> {
    let url = arguments
        .get("url")
        .and_then(|v| v.as_str())
        .unwrap_or_default();
    Ok(CallOutcome::success(vec![ContentBlock::text(format!("doc:{url}"))]))
}

type SessionFactory = dyn Fn() -> FakeSession + Send + Sync;

/// Connector handing out fresh `FakeSession`s and counting handshakes.
pub struct FakeConnector {
    factory: Box<SessionFactory>,
    fail_first: usize,
    connects: AtomicUsize,
    sessions: Mutex<Vec<Arc<FakeSession>>>,
}

impl FakeConnector {
    pub fn healthy(tools: &[&str]) -> Self {
        let tools: Vec<String> = tools.iter().map(|t| t.to_string()).collect();
        Self::with_factory(move || {
            let names: Vec<&str> = tools.iter().map(String::as_str).collect();
            FakeSession::new(&names)
        })
    }

    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn() -> FakeSession + Send + Sync + 'static,
    {
        Self {
            factory: Box::new(factory),
            fail_first: 0,
            connects: AtomicUsize::new(0),
            sessions: Mutex::new(Vec::new()),
        }
    }

    /// Refuse the first `n` handshakes.
    pub fn failing_first(mut self, n: usize) -> Self {
        self.fail_first = n;
        self
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn last_session(&self) -> Option<Arc<FakeSession>> {
        self.sessions.lock().unwrap().last().cloned()
    }
}

#[async_trait::async_trait]
impl Connector for FakeConnector {
    async fn connect(&self) -> Result<Arc<dyn ToolSession>, SessionError> {
        let attempt = self.connects.fetch_add(1, Ordering::SeqCst) + 1;
        if attempt <= self.fail_first {
            return Err(SessionError::connect(self.endpoint(), "handshake refused"));
        }

        let session = Arc::new((self.factory)());
        self.sessions.lock().unwrap().push(Arc::clone(&session));
        Ok(session)
    }

    fn endpoint(&self) -> &str {
        "fake://docs"
    }
}
