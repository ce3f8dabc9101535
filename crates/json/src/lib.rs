//! `forgeweb-json` — JSON conventions for envelope content.
//!
//! - date/time fields: pick a serde field module per field ([`date`],
//!   [`datetime`], [`date_millis`], [`datetime_millis`]); all of them read
//!   formatted text, all-digit strings and integers
//! - large integers: [`int_string`] per field, or the codec-wide
//!   [`IntegerPolicy`]
//! - [`JsonCodec`]: the encoder the HTTP layer writes envelopes with

pub mod codec;
pub mod error;
pub mod int_string;
pub mod time;

pub use codec::{IntegerPolicy, JsonCodec, JsonCodecBuilder, UnknownIntegerPolicy};
pub use error::CodecError;
pub use time::{
    date, date_millis, datetime, datetime_millis, parse_date, parse_datetime, DATE_FORMAT,
    DATE_TIME_FORMAT,
};
