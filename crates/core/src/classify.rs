//! Error classifier & responder.
//!
//! Maps every [`WebError`] to a transport status, a content-less envelope and
//! exactly one log record. The mapping is a single exhaustive `match`, so a new
//! failure kind cannot be added without deciding how it is reported.

use std::error::Error as StdError;
use std::fmt::Write as _;

use crate::envelope::ResponseEnvelope;
use crate::error::{Severity, WebError};
use crate::status::{StatusCode, WebStatusCode};

/// Protocol-level status, distinct from the envelope's business code.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TransportStatus {
    BadRequest,
    NotFound,
    ExpectationFailed,
    InternalServerError,
}

impl TransportStatus {
    pub const fn as_u16(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::ExpectationFailed => 417,
            Self::InternalServerError => 500,
        }
    }
}

/// What the responder logs for one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogDirective {
    pub severity: Severity,
    pub message: String,
    /// Full diagnostic trace; `None` for low-severity failures.
    pub diagnostic: Option<String>,
}

impl LogDirective {
    fn info(message: String) -> Self {
        Self {
            severity: Severity::Informational,
            message,
            diagnostic: None,
        }
    }

    fn warn(message: String, diagnostic: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            diagnostic: Some(diagnostic),
        }
    }

    /// Emit the record. Called exactly once per classified failure.
    pub fn emit(&self) {
        match (self.severity, &self.diagnostic) {
            (Severity::Warning, Some(diagnostic)) => {
                tracing::warn!(diagnostic = %diagnostic, "{}", self.message)
            }
            (Severity::Warning, None) => tracing::warn!("{}", self.message),
            (Severity::Informational, _) => tracing::info!("{}", self.message),
        }
    }
}

/// Result of classifying one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub status: TransportStatus,
    pub envelope: ResponseEnvelope<()>,
    pub log: LogDirective,
}

/// Classify a failure without side effects.
pub fn classify(err: &WebError) -> Classification {
    match err {
        WebError::Domain(domain) if domain.severity() == Severity::Informational => Classification {
            status: TransportStatus::ExpectationFailed,
            envelope: ResponseEnvelope::fail(domain.code(), domain.message()),
            log: LogDirective::info(format!("business failure: {}", domain.message())),
        },
        WebError::MethodNotSupported { method } => Classification {
            status: TransportStatus::BadRequest,
            envelope: ResponseEnvelope::fail_status(&WebStatusCode::HttpRequestMethodError),
            log: LogDirective::info(format!("request method not supported: {method}")),
        },
        WebError::ParamConversion { detail } => {
            let message = if detail.is_empty() {
                WebStatusCode::ParamError.message()
            } else {
                detail.as_str()
            };
            Classification {
                status: TransportStatus::BadRequest,
                envelope: ResponseEnvelope::fail(WebStatusCode::ParamError.code(), message),
                log: LogDirective::info(format!("request parameter conversion failed: {detail}")),
            }
        }
        WebError::MissingParam { detail } => Classification {
            status: TransportStatus::BadRequest,
            envelope: ResponseEnvelope::fail_status(&WebStatusCode::ParamError),
            log: LogDirective::info(format!("request parameter missing: {detail}")),
        },
        WebError::Validation(failures) => {
            let rendered = failures.render();
            Classification {
                status: TransportStatus::BadRequest,
                log: LogDirective::info(format!("request parameter validation failed: {rendered}")),
                envelope: ResponseEnvelope::fail(WebStatusCode::ParamError.code(), rendered),
            }
        }
        WebError::Domain(domain) => Classification {
            status: TransportStatus::BadRequest,
            envelope: ResponseEnvelope::fail(domain.code(), domain.message()),
            log: LogDirective::warn(
                format!("business warning: {}", domain.message()),
                error_chain(domain),
            ),
        },
        WebError::PathNotFound { path } => Classification {
            status: TransportStatus::NotFound,
            envelope: ResponseEnvelope::fail_status(&WebStatusCode::HttpRequestPathNotFound),
            log: LogDirective::info(format!("request path not found: {path}")),
        },
        WebError::Unclassified(cause) => Classification {
            status: TransportStatus::InternalServerError,
            envelope: ResponseEnvelope::fail_status(&WebStatusCode::InternalServerError),
            log: LogDirective::warn(format!("unhandled failure: {cause}"), format!("{cause:?}")),
        },
    }
}

/// Classify, log once, and hand back what goes on the wire.
pub fn respond(err: WebError) -> (TransportStatus, ResponseEnvelope<()>) {
    let Classification { status, envelope, log } = classify(&err);
    log.emit();
    (status, envelope)
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut depth = 0;
    while let Some(cause) = source {
        let _ = write!(out, "\n    {depth}: {cause}");
        depth += 1;
        source = cause.source();
    }
    out
}
