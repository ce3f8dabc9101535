//! Business status codes carried in the response envelope.
//!
//! A status code is an immutable `(code, message)` pair. The kit ships a closed
//! set of transport-level codes ([`WebStatusCode`]); applications declare their
//! own as `const` [`BusinessCode`] values.

/// A `(code, message)` pair placed into the envelope's `statusCode` / `message`.
pub trait StatusCode {
    fn code(&self) -> i32;

    fn message(&self) -> &str;
}

/// Generic codes used by the kit itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum WebStatusCode {
    Success,
    ParamError,
    HttpRequestMethodError,
    HttpRequestPathNotFound,
    InternalServerError,
}

impl WebStatusCode {
    pub const ALL: [WebStatusCode; 5] = [
        Self::Success,
        Self::ParamError,
        Self::HttpRequestMethodError,
        Self::HttpRequestPathNotFound,
        Self::InternalServerError,
    ];

    pub const fn as_code(self) -> i32 {
        match self {
            Self::Success => 200,
            Self::ParamError => 400,
            Self::HttpRequestMethodError => 401,
            Self::HttpRequestPathNotFound => 404,
            Self::InternalServerError => 50000,
        }
    }

    pub const fn as_message(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::ParamError => "param error",
            Self::HttpRequestMethodError => "http request method error",
            Self::HttpRequestPathNotFound => "http request path not found",
            Self::InternalServerError => "Internal Server Error or IllegalArgumentException",
        }
    }
}

impl StatusCode for WebStatusCode {
    fn code(&self) -> i32 {
        self.as_code()
    }

    fn message(&self) -> &str {
        self.as_message()
    }
}

/// Application-defined status code.
///
/// ```
/// use forgeweb_core::{BusinessCode, StatusCode};
///
/// const INSUFFICIENT_BALANCE: BusinessCode = BusinessCode::new(4001, "insufficient balance");
/// assert_eq!(INSUFFICIENT_BALANCE.code(), 4001);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct BusinessCode {
    code: i32,
    message: &'static str,
}

impl BusinessCode {
    pub const fn new(code: i32, message: &'static str) -> Self {
        Self { code, message }
    }
}

impl StatusCode for BusinessCode {
    fn code(&self) -> i32 {
        self.code
    }

    fn message(&self) -> &str {
        self.message
    }
}

impl<S: StatusCode + ?Sized> StatusCode for &S {
    fn code(&self) -> i32 {
        (**self).code()
    }

    fn message(&self) -> &str {
        (**self).message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_status_codes_keep_their_constructed_values() {
        let expected = [
            (200, "success"),
            (400, "param error"),
            (401, "http request method error"),
            (404, "http request path not found"),
            (50000, "Internal Server Error or IllegalArgumentException"),
        ];

        for (status, (code, message)) in WebStatusCode::ALL.iter().zip(expected) {
            assert_eq!(status.code(), code);
            assert_eq!(status.message(), message);
        }
    }

    #[test]
    fn repeated_reads_are_stable() {
        let status = WebStatusCode::InternalServerError;
        let first = status.message();
        let second = status.message();
        assert_eq!(status.code(), status.code());
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn business_code_is_usable_as_a_constant() {
        const LOCKED: BusinessCode = BusinessCode::new(4003, "account locked");
        assert_eq!(LOCKED.code(), 4003);
        assert_eq!(LOCKED.message(), "account locked");
        assert_eq!((&LOCKED).code(), 4003);
    }
}
