use axum::{extract::Extension, Json};
use chrono::{Local, NaiveDateTime};
use forgeweb_core::ResponseEnvelope;
use serde::Serialize;

use crate::context::RequestContext;

pub async fn health() -> ResponseEnvelope<()> {
    ResponseEnvelope::success()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerTime {
    #[serde(with = "forgeweb_json::datetime")]
    pub now: NaiveDateTime,
    #[serde(with = "forgeweb_json::datetime_millis")]
    pub now_millis: NaiveDateTime,
    pub trace_id: String,
    pub received_at: i64,
}

/// Server clock in both wire forms, plus the request's trace id.
pub async fn time(Extension(ctx): Extension<RequestContext>) -> Json<ServerTime> {
    let now = Local::now().naive_local();
    Json(ServerTime {
        now,
        now_millis: now,
        trace_id: ctx.trace_id().to_string(),
        received_at: ctx.received_at().timestamp_millis(),
    })
}
