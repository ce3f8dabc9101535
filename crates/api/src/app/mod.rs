//! HTTP application wiring (Axum router + kit layers).
//!
//! - `envelope.rs`: success-path wrapping and method-not-allowed mapping
//! - `errors.rs`: fallback, panic handler, validation conversion
//! - `extract.rs`: extractors that reject with classified failures
//! - `routes/`: demo endpoints (one file per area)
//! - `dto.rs` / `services.rs`: request/response shapes and the in-memory book

use std::sync::Arc;

use axum::{middleware::from_fn, middleware::from_fn_with_state, Extension, Router};
use forgeweb_json::JsonCodec;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;

use crate::config::ServerConfig;
use crate::middleware::{self, TraceState};

pub mod dto;
pub mod envelope;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Attach the kit to an application router.
///
/// Outermost first: trace id, request log, panic mapping, envelope. The
/// fallback turns unknown paths into classified 404s. JSON bodies larger
/// than `config.body_limit` are sent as the handler produced them.
pub fn install(router: Router, config: &ServerConfig) -> Router {
    let codec = JsonCodec::builder()
        .integers(config.integer_policy)
        .build();
    let envelope_state = envelope::EnvelopeState {
        codec: Arc::new(codec),
        body_limit: config.body_limit,
    };
    let trace_state = TraceState {
        header: config.trace_header.clone(),
    };

    router.fallback(errors::not_found).layer(
        ServiceBuilder::new()
            .layer(from_fn_with_state(trace_state, middleware::trace_id_middleware))
            .layer(from_fn(middleware::request_log_middleware))
            .layer(CatchPanicLayer::custom(errors::panic_response))
            .layer(from_fn_with_state(envelope_state, envelope::envelope_middleware)),
    )
}

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ServerConfig) -> Router {
    let book = Arc::new(services::AccountBook::seeded());
    install(routes::router().layer(Extension(book)), config)
}
