//! Tracing, logging, and the request-scoped trace id (shared setup).

/// Initialize process-wide tracing/logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filters, layers).
pub mod tracing;

/// Per-request correlation id.
pub mod trace_id;

pub use trace_id::TraceId;
pub use self::tracing::{LogFormat, UnknownLogFormat};
