use axum::{routing::get, Router};

pub mod accounts;
pub mod system;

/// Router for every application endpoint; kit layers are added by `app::install`.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/time", get(system::time))
        .nest("/accounts", accounts::router())
}
