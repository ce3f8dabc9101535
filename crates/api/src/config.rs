//! Runtime configuration read from the environment.

use std::net::SocketAddr;

use axum::http::HeaderName;
use forgeweb_json::IntegerPolicy;
use forgeweb_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_TRACE_HEADER: &str = "traceId";
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
#[error("invalid value '{value}' for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Header carrying the caller's trace id; echoed back on the response.
    pub trace_header: HeaderName,
    /// Largest JSON body the envelope middleware buffers.
    pub body_limit: usize,
    pub integer_policy: IntegerPolicy,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            trace_header: HeaderName::from_static("traceid"),
            body_limit: DEFAULT_BODY_LIMIT,
            integer_policy: IntegerPolicy::default(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// `FORGEWEB_BIND`, `FORGEWEB_TRACE_HEADER`, `FORGEWEB_BODY_LIMIT`,
    /// `FORGEWEB_INTEGER_POLICY`, `FORGEWEB_LOG_FORMAT`; unset keys keep defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(v) = lookup("FORGEWEB_BIND") {
            config.bind_addr = parse("FORGEWEB_BIND", v)?;
        }
        if let Some(v) = lookup("FORGEWEB_TRACE_HEADER") {
            config.trace_header = parse("FORGEWEB_TRACE_HEADER", v)?;
        }
        if let Some(v) = lookup("FORGEWEB_BODY_LIMIT") {
            config.body_limit = parse("FORGEWEB_BODY_LIMIT", v)?;
        }
        if let Some(v) = lookup("FORGEWEB_INTEGER_POLICY") {
            config.integer_policy = parse("FORGEWEB_INTEGER_POLICY", v)?;
        }
        if let Some(v) = lookup("FORGEWEB_LOG_FORMAT") {
            config.log_format = parse("FORGEWEB_LOG_FORMAT", v)?;
        }

        Ok(config)
    }
}

fn parse<T>(key: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError {
        key,
        reason: e.to_string(),
        value,
    })
}
