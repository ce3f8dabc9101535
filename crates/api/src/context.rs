use std::time::Instant;

use chrono::{DateTime, Utc};
use forgeweb_observability::TraceId;

/// Per-request context inserted by the trace-id middleware.
///
/// This is immutable and present for every request that went through the
/// kit's layers; handlers read it via `Extension<RequestContext>`.
#[derive(Debug, Clone)]
pub struct RequestContext {
    trace_id: TraceId,
    received_at: DateTime<Utc>,
    started: Instant,
}

impl RequestContext {
    pub fn new(trace_id: TraceId) -> Self {
        Self {
            trace_id,
            received_at: Utc::now(),
            started: Instant::now(),
        }
    }

    pub fn trace_id(&self) -> &TraceId {
        &self.trace_id
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Milliseconds since the request entered the kit.
    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}
