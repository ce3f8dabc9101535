//! `forgeweb-core` — response envelope and error-to-response policy.
//!
//! This crate is framework-agnostic; the optional `axum` feature adds
//! `IntoResponse` impls for the envelope and the failure taxonomy.

pub mod classify;
pub mod envelope;
pub mod error;
pub mod status;

#[cfg(feature = "axum")]
pub mod response;

pub use classify::{classify, respond, Classification, LogDirective, TransportStatus};
pub use envelope::{is_json, should_wrap, ResponseEnvelope};
pub use error::{DomainError, FieldFailure, Severity, ValidationFailureSet, WebError};
pub use status::{BusinessCode, StatusCode, WebStatusCode};

#[cfg(feature = "axum")]
pub use response::Enveloped;
