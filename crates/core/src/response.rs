//! axum integration (`axum` feature).
//!
//! Handlers return `Result<ResponseEnvelope<T>, WebError>`; both sides turn
//! into JSON envelope responses and are tagged with [`Enveloped`] so the
//! success-path middleware never wraps them a second time.

use axum::http::StatusCode as HttpStatus;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::classify::{respond, TransportStatus};
use crate::envelope::ResponseEnvelope;
use crate::error::WebError;

/// Response extension marking a body that is already an envelope.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Enveloped;

impl From<TransportStatus> for HttpStatus {
    fn from(value: TransportStatus) -> Self {
        match value {
            TransportStatus::BadRequest => HttpStatus::BAD_REQUEST,
            TransportStatus::NotFound => HttpStatus::NOT_FOUND,
            TransportStatus::ExpectationFailed => HttpStatus::EXPECTATION_FAILED,
            TransportStatus::InternalServerError => HttpStatus::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<T: Serialize> IntoResponse for ResponseEnvelope<T> {
    fn into_response(self) -> Response {
        let mut res = Json(self).into_response();
        res.extensions_mut().insert(Enveloped);
        res
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let (status, envelope) = respond(self);
        (HttpStatus::from(status), envelope).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainError;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn envelope_response_is_tagged_json() {
        let res = ResponseEnvelope::success_with(vec!["a"]).into_response();
        assert_eq!(res.status(), HttpStatus::OK);
        assert!(res.extensions().get::<Enveloped>().is_some());
        assert_eq!(
            body_json(res).await,
            serde_json::json!({"statusCode": 200, "message": "success", "content": ["a"]})
        );
    }

    #[tokio::test]
    async fn informational_error_maps_to_417() {
        let res = WebError::from(DomainError::info(4001, "insufficient balance")).into_response();
        assert_eq!(res.status(), HttpStatus::EXPECTATION_FAILED);
        assert!(res.extensions().get::<Enveloped>().is_some());
        assert_eq!(
            body_json(res).await,
            serde_json::json!({"statusCode": 4001, "message": "insufficient balance"})
        );
    }

    #[tokio::test]
    async fn unclassified_error_maps_to_500_without_detail() {
        let res = WebError::unclassified(anyhow::anyhow!("connection string leaked")).into_response();
        assert_eq!(res.status(), HttpStatus::INTERNAL_SERVER_ERROR);
        let body = body_json(res).await;
        assert_eq!(body["statusCode"], 50000);
        assert!(!body.to_string().contains("connection string"));
    }
}
