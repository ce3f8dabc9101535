use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Query, Request, State},
    http::{header, HeaderName, HeaderValue, Uri},
    middleware::Next,
    response::Response,
};
use forgeweb_observability::TraceId;

use crate::context::RequestContext;

#[derive(Debug, Clone)]
pub struct TraceState {
    pub header: HeaderName,
}

/// Scope a trace id around the rest of the pipeline.
///
/// The id comes from the configured header when present and non-empty,
/// otherwise it is generated. It is released when the inner future finishes,
/// whichever way it finishes, and echoed on the response.
pub async fn trace_id_middleware(
    State(state): State<TraceState>,
    mut req: Request,
    next: Next,
) -> Response {
    let trace_id = TraceId::from_header(
        req.headers()
            .get(&state.header)
            .and_then(|v| v.to_str().ok()),
    );
    req.extensions_mut()
        .insert(RequestContext::new(trace_id.clone()));

    let mut res = trace_id.clone().scope(next.run(req)).await;

    match HeaderValue::from_str(trace_id.as_str()) {
        Ok(value) => {
            res.headers_mut().insert(state.header, value);
        }
        Err(error) => {
            tracing::warn!(%error, trace_id = %trace_id, "failed to encode trace id header");
        }
    }
    res
}

/// Log one line when a request arrives and one when it completes.
pub async fn request_log_middleware(req: Request, next: Next) -> Response {
    let ctx = req
        .extensions()
        .get::<RequestContext>()
        .cloned()
        .unwrap_or_else(|| RequestContext::new(TraceId::generate()));

    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let remote = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    tracing::info!(
        user_agent = %user_agent,
        remote = %remote,
        method = %req.method(),
        path = %req.uri().path(),
        start = ctx.received_at().timestamp_millis(),
        params = %query_params_json(req.uri()),
        "request received"
    );

    let res = next.run(req).await;

    tracing::info!(
        status = res.status().as_u16(),
        duration_ms = ctx.elapsed_ms() as u64,
        "request completed"
    );
    res
}

/// Query parameters as a JSON object of arrays, e.g. `{"tag":["a","b"]}`.
fn query_params_json(uri: &Uri) -> String {
    let pairs = Query::<Vec<(String, String)>>::try_from_uri(uri)
        .map(|Query(pairs)| pairs)
        .unwrap_or_default();

    let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (key, value) in pairs {
        params.entry(key).or_default().push(value);
    }
    serde_json::to_string(&params).unwrap_or_else(|_| "{}".to_string())
}
