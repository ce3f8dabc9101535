//! Success-path envelope interception.
//!
//! Runs innermost, directly around the router, so everything a handler or
//! fallback produces passes through here once. JSON bodies that are neither
//! marked [`Enveloped`] nor already shaped like an envelope are wrapped in a
//! success envelope; every JSON envelope is then re-encoded through the shared
//! [`JsonCodec`].
//!
//! Bodies whose known size exceeds the buffer limit pass through untouched.

use std::sync::Arc;

use axum::{
    body::{Body, HttpBody},
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use forgeweb_core::{is_json, should_wrap, Enveloped, ResponseEnvelope, WebError};
use forgeweb_json::JsonCodec;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct EnvelopeState {
    pub codec: Arc<JsonCodec>,
    /// Largest body buffered for re-encoding.
    pub body_limit: usize,
}

pub async fn envelope_middleware(
    State(state): State<EnvelopeState>,
    req: Request,
    next: Next,
) -> Response {
    let method = req.method().clone();
    let res = next.run(req).await;

    let res = if res.status() == StatusCode::METHOD_NOT_ALLOWED
        && res.extensions().get::<Enveloped>().is_none()
    {
        method_not_allowed(res, method.as_str())
    } else {
        res
    };

    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());
    if !content_type.is_some_and(is_json) {
        return res;
    }
    let wrap = should_wrap(content_type, res.extensions().get::<Enveloped>().is_some());

    let size = res.body().size_hint().lower();
    if usize::try_from(size).map_or(true, |size| size > state.body_limit) {
        tracing::warn!(size, limit = state.body_limit, "response body over limit; not enveloped");
        return res;
    }

    match reencode(&state, res, wrap).await {
        Ok(res) => res,
        Err(err) => err.into_response(),
    }
}

/// The router's bare 405 becomes a classified method failure; `Allow` is kept.
fn method_not_allowed(original: Response, method: &str) -> Response {
    let allow = original.headers().get(header::ALLOW).cloned();
    let mut res = WebError::method_not_supported(method).into_response();
    if let Some(allow) = allow {
        res.headers_mut().insert(header::ALLOW, allow);
    }
    res
}

async fn reencode(state: &EnvelopeState, res: Response, wrap: bool) -> Result<Response, WebError> {
    let (mut parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, state.body_limit)
        .await
        .map_err(|e| WebError::unclassified(anyhow::Error::new(e).context("buffering response body")))?;

    let envelope: ResponseEnvelope<Value> = if wrap {
        let content = if bytes.is_empty() {
            None
        } else {
            match serde_json::from_slice(&bytes).map_err(WebError::unclassified)? {
                Value::Null => None,
                value => Some(value),
            }
        };
        match content {
            Some(value) => match as_envelope(&value) {
                Some(envelope) => envelope,
                None => ResponseEnvelope::success_with(value),
            },
            None => ResponseEnvelope::success_opt(None),
        }
    } else {
        serde_json::from_slice(&bytes).map_err(WebError::unclassified)?
    };

    let encoded = state
        .codec
        .encode_envelope(&envelope)
        .map_err(WebError::unclassified)?;

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.extensions.insert(Enveloped);
    Ok(Response::from_parts(parts, Body::from(encoded)))
}

/// An unmarked body that is already an envelope: an object holding an integer
/// `statusCode`, a string `message` and optionally `content`, nothing else.
fn as_envelope(value: &Value) -> Option<ResponseEnvelope<Value>> {
    let object = value.as_object()?;
    if object
        .keys()
        .any(|key| !matches!(key.as_str(), "statusCode" | "message" | "content"))
    {
        return None;
    }
    let status_code = i32::try_from(object.get("statusCode")?.as_i64()?).ok()?;
    let message = object.get("message")?.as_str()?;
    let content = object.get("content").filter(|c| !c.is_null()).cloned();
    Some(ResponseEnvelope::new(status_code, message, content))
}
