//! Envelope encoder with startup-time configuration.
//!
//! [`JsonCodecBuilder`] is assembled once at startup and consumed by
//! [`JsonCodecBuilder::build`]; the resulting [`JsonCodec`] is immutable and
//! shared across requests.

use std::str::FromStr;

use forgeweb_core::ResponseEnvelope;
use serde::Serialize;
use serde_json::Value;

use crate::error::CodecError;

/// Largest integer a JavaScript `number` holds exactly (2^53 - 1).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// How integers inside envelope content are written.
///
/// Integer width is not visible after serialization; the default quotes every
/// integer, `i64` and `u64` included.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum IntegerPolicy {
    /// Leave numbers as serde produced them.
    Preserve,
    /// Quote integers a JavaScript client would round.
    UnsafeAsString,
    /// Quote every integer.
    #[default]
    AllAsString,
}

impl IntegerPolicy {
    fn quotes(self, n: &serde_json::Number) -> bool {
        match self {
            Self::Preserve => false,
            Self::AllAsString => n.is_i64() || n.is_u64(),
            Self::UnsafeAsString => {
                if let Some(v) = n.as_i64() {
                    v.unsigned_abs() > MAX_SAFE_INTEGER
                } else {
                    n.as_u64().is_some_and(|v| v > MAX_SAFE_INTEGER)
                }
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown integer policy '{0}' (expected preserve, unsafe-as-string or all-as-string)")]
pub struct UnknownIntegerPolicy(pub String);

impl FromStr for IntegerPolicy {
    type Err = UnknownIntegerPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(Self::Preserve),
            "unsafe-as-string" => Ok(Self::UnsafeAsString),
            "all-as-string" => Ok(Self::AllAsString),
            other => Err(UnknownIntegerPolicy(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonCodecBuilder {
    integers: IntegerPolicy,
    pretty: bool,
}

impl JsonCodecBuilder {
    pub fn integers(mut self, policy: IntegerPolicy) -> Self {
        self.integers = policy;
        self
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn build(self) -> JsonCodec {
        tracing::debug!(integers = ?self.integers, pretty = self.pretty, "json codec configured");
        JsonCodec {
            integers: self.integers,
            pretty: self.pretty,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
    integers: IntegerPolicy,
    pretty: bool,
}

impl JsonCodec {
    pub fn builder() -> JsonCodecBuilder {
        JsonCodecBuilder::default()
    }

    pub fn integer_policy(&self) -> IntegerPolicy {
        self.integers
    }

    /// Apply the integer policy to every number inside `value`.
    pub fn normalize(&self, value: &mut Value) {
        match value {
            Value::Number(n) if self.integers.quotes(n) => {
                let quoted = n.to_string();
                *value = Value::String(quoted);
            }
            Value::Array(items) => items.iter_mut().for_each(|v| self.normalize(v)),
            Value::Object(map) => map.values_mut().for_each(|v| self.normalize(v)),
            _ => {}
        }
    }

    /// Encode an envelope; the policy touches `content` only, never `statusCode`.
    pub fn encode_envelope<T: Serialize>(
        &self,
        envelope: &ResponseEnvelope<T>,
    ) -> Result<Vec<u8>, CodecError> {
        let content = match envelope.content() {
            Some(content) => {
                let mut value = serde_json::to_value(content)?;
                self.normalize(&mut value);
                Some(value)
            }
            None => None,
        };
        let normalized = ResponseEnvelope::new(envelope.status_code(), envelope.message(), content);

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&normalized)?
        } else {
            serde_json::to_vec(&normalized)?
        };
        Ok(bytes)
    }
}
