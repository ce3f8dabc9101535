use std::any::Any;

use axum::{
    http::Uri,
    response::{IntoResponse, Response},
};
use forgeweb_core::{ValidationFailureSet, WebError};

/// Router fallback: an unknown path is a classified 404.
pub async fn not_found(uri: Uri) -> WebError {
    WebError::path_not_found(uri.path())
}

/// `CatchPanicLayer` handler: a panicking handler is an unclassified failure.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "panic with a non-string payload".to_string()
    };
    WebError::unclassified(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}

/// Flatten `validator` output into field failures.
///
/// `validator` keys errors by field in a map, so fields are sorted by name to
/// keep the rendered message stable. Nested structs and lists are reported
/// under their dotted / indexed path.
pub fn failures_from(errors: &validator::ValidationErrors) -> ValidationFailureSet {
    let mut out = ValidationFailureSet::new();
    collect(errors, None, &mut out);
    out
}

fn collect(errors: &validator::ValidationErrors, prefix: Option<&str>, out: &mut ValidationFailureSet) {
    use validator::ValidationErrorsKind;

    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        let path = match prefix {
            Some(p) => format!("{p}.{field}"),
            None => field.to_string(),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    out.push(path.clone(), message);
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, Some(&path), out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, Some(&format!("{path}[{index}]")), out);
                }
            }
        }
    }
}
