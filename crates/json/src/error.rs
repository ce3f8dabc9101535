use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("cannot parse '{input}' as {expected}: {source}")]
    InvalidFormat {
        input: String,
        expected: &'static str,
        #[source]
        source: chrono::ParseError,
    },

    #[error("'{0}' is not a valid epoch-millisecond timestamp")]
    InvalidTimestamp(String),

    #[error("epoch-millisecond timestamp {0} is out of range")]
    TimestampOutOfRange(i64),

    #[error("local time {0} does not exist in the system time zone")]
    NonexistentLocalTime(NaiveDateTime),

    #[error("json encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
