//! Date/time conversions shared by the serde field modules.
//!
//! Formatted text uses `%Y-%m-%d` / `%Y-%m-%d %H:%M:%S`. Epoch milliseconds are
//! interpreted in the system time zone. Any all-digit string is treated as
//! epoch milliseconds, everything else as formatted text.

use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::de::{self, Visitor};

use crate::error::CodecError;

pub mod date;
pub mod date_millis;
pub mod datetime;
pub mod datetime_millis;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a date from epoch-millisecond digits or `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Result<NaiveDate, CodecError> {
    if is_numeric(input) {
        return date_from_millis(parse_millis(input)?);
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| CodecError::InvalidFormat {
        input: input.to_string(),
        expected: "date (YYYY-MM-DD)",
        source,
    })
}

/// Parse a date-time from epoch-millisecond digits or `YYYY-MM-DD HH:mm:ss`.
pub fn parse_datetime(input: &str) -> Result<NaiveDateTime, CodecError> {
    if is_numeric(input) {
        return datetime_from_millis(parse_millis(input)?);
    }
    NaiveDateTime::parse_from_str(input, DATE_TIME_FORMAT).map_err(|source| {
        CodecError::InvalidFormat {
            input: input.to_string(),
            expected: "date-time (YYYY-MM-DD HH:mm:ss)",
            source,
        }
    })
}

pub fn datetime_from_millis(millis: i64) -> Result<NaiveDateTime, CodecError> {
    DateTime::from_timestamp_millis(millis)
        .map(|utc| utc.with_timezone(&Local).naive_local())
        .ok_or(CodecError::TimestampOutOfRange(millis))
}

pub fn date_from_millis(millis: i64) -> Result<NaiveDate, CodecError> {
    datetime_from_millis(millis).map(|dt| dt.date())
}

pub fn datetime_to_millis(value: &NaiveDateTime) -> Result<i64, CodecError> {
    value
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or(CodecError::NonexistentLocalTime(*value))
}

/// Milliseconds of local midnight at the start of `value`.
pub fn date_to_millis(value: &NaiveDate) -> Result<i64, CodecError> {
    datetime_to_millis(&value.and_time(NaiveTime::MIN))
}

fn is_numeric(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

fn parse_millis(input: &str) -> Result<i64, CodecError> {
    input
        .parse()
        .map_err(|_| CodecError::InvalidTimestamp(input.to_string()))
}

/// Accepts a JSON string (digits or formatted) or a JSON integer (millis).
pub(crate) struct FlexibleVisitor<T> {
    expecting: &'static str,
    parse: fn(&str) -> Result<T, CodecError>,
    from_millis: fn(i64) -> Result<T, CodecError>,
}

impl<T> FlexibleVisitor<T> {
    pub(crate) fn new(
        expecting: &'static str,
        parse: fn(&str) -> Result<T, CodecError>,
        from_millis: fn(i64) -> Result<T, CodecError>,
    ) -> Self {
        Self {
            expecting,
            parse,
            from_millis,
        }
    }
}

impl<'de, T> Visitor<'de> for FlexibleVisitor<T> {
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.expecting)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        (self.parse)(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        (self.from_millis)(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        let millis = i64::try_from(v)
            .map_err(|_| E::custom(CodecError::InvalidTimestamp(v.to_string())))?;
        self.visit_i64(millis)
    }
}
