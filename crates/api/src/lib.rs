//! HTTP kit: envelope interception, error classification, trace ids and
//! request logging for axum applications.
//!
//! Applications build their own `Router` and hand it to [`app::install`].

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;

pub use app::{build_app, install};
pub use config::{ConfigError, ServerConfig};
pub use context::RequestContext;
