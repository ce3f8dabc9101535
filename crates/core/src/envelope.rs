//! Uniform response envelope: `{"statusCode", "message", "content"?}`.

use serde::{Deserialize, Serialize};

use crate::status::{StatusCode, WebStatusCode};

/// Wire shape of every JSON response produced through the kit.
///
/// `content` is omitted, not written as `null`, when there is no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope<T> {
    status_code: i32,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<T>,
}

impl<T> ResponseEnvelope<T> {
    /// Build an envelope; `None` content degenerates to the two-field form.
    pub fn new(status_code: i32, message: impl Into<String>, content: Option<T>) -> Self {
        Self {
            status_code,
            message: message.into(),
            content,
        }
    }

    pub fn success_with(content: T) -> Self {
        Self::success_opt(Some(content))
    }

    pub fn success_opt(content: Option<T>) -> Self {
        Self::from_status(&WebStatusCode::Success, content)
    }

    pub fn fail_with(code: i32, message: impl Into<String>, content: Option<T>) -> Self {
        Self::new(code, message, content)
    }

    pub fn fail_status_with(status: &impl StatusCode, content: Option<T>) -> Self {
        Self::from_status(status, content)
    }

    fn from_status(status: &impl StatusCode, content: Option<T>) -> Self {
        Self::new(status.code(), status.message(), content)
    }

    pub fn status_code(&self) -> i32 {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn into_content(self) -> Option<T> {
        self.content
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ResponseEnvelope<U> {
        ResponseEnvelope {
            status_code: self.status_code,
            message: self.message,
            content: self.content.map(f),
        }
    }
}

impl ResponseEnvelope<()> {
    pub fn success() -> Self {
        Self::success_opt(None)
    }

    pub fn fail(code: i32, message: impl Into<String>) -> Self {
        Self::new(code, message, None)
    }

    pub fn fail_status(status: &impl StatusCode) -> Self {
        Self::from_status(status, None)
    }
}

/// Whether a successful response body still needs wrapping.
///
/// Only JSON bodies are wrapped, and never twice.
pub fn should_wrap(content_type: Option<&str>, already_enveloped: bool) -> bool {
    !already_enveloped && content_type.is_some_and(is_json)
}

/// `true` when the media type essence is `application/json`.
pub fn is_json(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|essence| essence.eq_ignore_ascii_case("application/json"))
}
