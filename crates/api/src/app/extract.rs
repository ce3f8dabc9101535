//! Extractors whose rejections are classified failures.
//!
//! axum's own `Path`, `Query` and `Json` reject with plain-text responses;
//! these wrappers turn the rejection into a [`WebError`] so it goes through
//! the same classifier as everything else.

use axum::{
    async_trait,
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, Request,
    },
    http::request::Parts,
    Json,
};
use forgeweb_core::WebError;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::app::errors::failures_from;

/// Path parameters; a value that does not convert is a parameter error.
#[derive(Debug, Clone, Copy)]
pub struct ParamPath<T>(pub T);

/// Query parameters; a missing required key is a missing-parameter error.
#[derive(Debug, Clone, Copy)]
pub struct ParamQuery<T>(pub T);

/// JSON body checked with `validator` after deserialization.
#[derive(Debug, Clone, Copy)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ParamPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(from_path_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequestParts<S> for ParamQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(from_query_rejection(rejection)),
        }
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(from_json_rejection)?;
        value
            .validate()
            .map_err(|errors| WebError::from(failures_from(&errors)))?;
        Ok(Self(value))
    }
}

const MISSING_FIELD: &str = "missing field";

fn from_path_rejection(rejection: PathRejection) -> WebError {
    match rejection {
        PathRejection::FailedToDeserializePathParams(e) => WebError::param_conversion(e.body_text()),
        PathRejection::MissingPathParams(e) => WebError::missing_param(e.body_text()),
        other => WebError::unclassified(anyhow::anyhow!(other.body_text())),
    }
}

/// `QueryRejection` carries no structured error kind, only text. The match
/// is on the prefix of serde's `de::Error::missing_field` message, which
/// `serde_urlencoded` passes through unchanged.
fn from_query_rejection(rejection: QueryRejection) -> WebError {
    let detail = rejection.body_text();
    if detail.contains(MISSING_FIELD) {
        WebError::missing_param(detail)
    } else {
        WebError::param_conversion(detail)
    }
}

fn from_json_rejection(rejection: JsonRejection) -> WebError {
    WebError::param_conversion(rejection.body_text())
}
