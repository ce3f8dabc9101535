//! `NaiveDateTime` as `"YYYY-MM-DD HH:mm:ss"`.

use chrono::NaiveDateTime;
use serde::{Deserializer, Serializer};

use super::{datetime_from_millis, parse_datetime, FlexibleVisitor, DATE_TIME_FORMAT};

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATE_TIME_FORMAT))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    deserializer.deserialize_any(FlexibleVisitor::new(
        "a YYYY-MM-DD HH:mm:ss date-time or epoch milliseconds",
        parse_datetime,
        datetime_from_millis,
    ))
}
