//! Failure taxonomy handed to the responder.

use std::fmt;

use thiserror::Error;

use crate::status::StatusCode;

/// How loudly a [`DomainError`] is reported.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Expected business-rule failure. Logged at info, no diagnostic trace.
    Informational,
    /// Unexpected but handled. Logged at warn with the full diagnostic trace.
    Warning,
}

/// Business failure raised by application code.
///
/// Both severities carry the same fields; the severity only changes the
/// transport status and how the failure is logged.
#[derive(Debug)]
pub struct DomainError {
    severity: Severity,
    code: i32,
    message: String,
    source: Option<anyhow::Error>,
}

impl DomainError {
    pub fn new(severity: Severity, code: i32, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            source: None,
        }
    }

    pub fn info(code: i32, message: impl Into<String>) -> Self {
        Self::new(Severity::Informational, code, message)
    }

    pub fn warn(code: i32, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    pub fn info_status(status: &impl StatusCode) -> Self {
        Self::info(status.code(), status.message())
    }

    pub fn warn_status(status: &impl StatusCode) -> Self {
        Self::warn(status.code(), status.message())
    }

    /// Attach the underlying cause; it shows up in the warn-level diagnostic.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| {
            let e: &(dyn std::error::Error + Send + Sync + 'static) = e.as_ref();
            e as &(dyn std::error::Error + 'static)
        })
    }
}

/// One `(field, message)` pair reported by input binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub field: String,
    pub message: String,
}

/// Field failures in the order the validator reported them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationFailureSet {
    failures: Vec<FieldFailure>,
}

impl ValidationFailureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.failures.push(FieldFailure {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.push(field, message);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldFailure> {
        self.failures.iter()
    }

    /// Render as `"<field> <message>; "` per entry.
    ///
    /// The trailing `"; "` after the last entry is part of the wire contract
    /// clients already parse.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for failure in &self.failures {
            out.push_str(&failure.field);
            out.push(' ');
            out.push_str(&failure.message);
            out.push_str("; ");
        }
        out
    }
}

impl fmt::Display for ValidationFailureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl<F, M> FromIterator<(F, M)> for ValidationFailureSet
where
    F: Into<String>,
    M: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, M)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (field, message) in iter {
            set.push(field, message);
        }
        set
    }
}

/// Every failure that can reach the HTTP boundary.
///
/// Adding a kind means adding a variant here and an arm in
/// [`crate::classify::classify`]; the match there is exhaustive.
#[derive(Debug, Error)]
pub enum WebError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("request method '{method}' is not supported")]
    MethodNotSupported { method: String },

    #[error("{detail}")]
    ParamConversion { detail: String },

    #[error("{detail}")]
    MissingParam { detail: String },

    #[error("validation failed: {0}")]
    Validation(ValidationFailureSet),

    #[error("no route for path '{path}'")]
    PathNotFound { path: String },

    #[error(transparent)]
    Unclassified(#[from] anyhow::Error),
}

impl WebError {
    pub fn method_not_supported(method: impl Into<String>) -> Self {
        Self::MethodNotSupported {
            method: method.into(),
        }
    }

    pub fn param_conversion(detail: impl Into<String>) -> Self {
        Self::ParamConversion {
            detail: detail.into(),
        }
    }

    pub fn missing_param(detail: impl Into<String>) -> Self {
        Self::MissingParam {
            detail: detail.into(),
        }
    }

    pub fn path_not_found(path: impl Into<String>) -> Self {
        Self::PathNotFound { path: path.into() }
    }

    pub fn unclassified(err: impl Into<anyhow::Error>) -> Self {
        Self::Unclassified(err.into())
    }
}

impl From<ValidationFailureSet> for WebError {
    fn from(value: ValidationFailureSet) -> Self {
        Self::Validation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::BusinessCode;

    #[test]
    fn render_keeps_trailing_separator() {
        let set = ValidationFailureSet::new()
            .with("name", "required")
            .with("age", "must be positive");

        // The trailing "; " looks accidental but clients depend on it; keep it.
        assert_eq!(set.render(), "name required; age must be positive; ");
    }

    #[test]
    fn render_of_empty_set_is_empty() {
        assert_eq!(ValidationFailureSet::new().render(), "");
    }

    #[test]
    fn collect_preserves_reporting_order() {
        let set: ValidationFailureSet = [("b", "x"), ("a", "y")].into_iter().collect();
        let fields: Vec<_> = set.iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, ["b", "a"]);
    }

    #[test]
    fn domain_error_from_status_code() {
        const BALANCE: BusinessCode = BusinessCode::new(4001, "insufficient balance");
        let err = DomainError::info_status(&BALANCE);
        assert_eq!(err.severity(), Severity::Informational);
        assert_eq!(err.code(), 4001);
        assert_eq!(err.to_string(), "insufficient balance");
    }

    #[test]
    fn anyhow_errors_become_unclassified() {
        let err: WebError = anyhow::anyhow!("disk on fire").into();
        assert!(matches!(err, WebError::Unclassified(_)));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: rendered length is the sum of every "<field> <message>; " chunk.
            #[test]
            fn render_concatenates_every_entry(
                pairs in prop::collection::vec(("[a-z]{1,8}", "[a-z ]{0,16}"), 0..8)
            ) {
                let set: ValidationFailureSet = pairs.iter().cloned().collect();
                let rendered = set.render();

                let expected: usize = pairs.iter().map(|(f, m)| f.len() + m.len() + 3).sum();
                prop_assert_eq!(rendered.len(), expected);
                prop_assert_eq!(rendered.is_empty(), pairs.is_empty());
                if !pairs.is_empty() {
                    prop_assert!(rendered.ends_with("; "));
                }
            }
        }
    }
}
