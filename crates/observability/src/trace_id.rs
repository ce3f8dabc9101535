//! Request-scoped trace identifier.
//!
//! The id lives in tokio task-local storage for exactly as long as the future
//! passed to [`TraceId::scope`]; once that future completes (or unwinds) the
//! id is gone, so a worker that picks up the next request never sees it.
//!
//! Task-locals are not inherited by spawned tasks. Wrap spawned work in
//! [`TraceId::scope`] again if it should log under the same id.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio::task_local;
use tracing::Instrument;
use uuid::Uuid;

task_local! {
    static TRACE_ID: TraceId;
}

/// Correlation id threaded through log output of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TraceId(Arc<str>);

impl TraceId {
    /// Fresh id: a UUID without dashes.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string().into())
    }

    /// Use the caller-supplied id when it is non-empty, otherwise generate one.
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Self(v.into()),
            _ => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id of the request currently being handled on this task, if any.
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(Clone::clone).ok()
    }

    /// Run `fut` with this id in scope and inside a `request` span carrying it.
    pub async fn scope<Fut>(self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        let span = tracing::info_span!("request", trace_id = %self);
        TRACE_ID.scope(self, fut.instrument(span)).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
