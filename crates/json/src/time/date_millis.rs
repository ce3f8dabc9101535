//! `NaiveDate` as epoch milliseconds of local midnight.

use chrono::NaiveDate;
use serde::ser::Error as _;
use serde::{Deserializer, Serializer};

use super::{date_from_millis, date_to_millis, parse_date, FlexibleVisitor};

pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = date_to_millis(value).map_err(S::Error::custom)?;
    serializer.serialize_i64(millis)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    deserializer.deserialize_any(FlexibleVisitor::new(
        "epoch milliseconds or a YYYY-MM-DD date",
        parse_date,
        date_from_millis,
    ))
}
