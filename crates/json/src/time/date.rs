//! `NaiveDate` as `"YYYY-MM-DD"`.
//!
//! ```
//! use chrono::NaiveDate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Statement {
//!     #[serde(with = "forgeweb_json::date")]
//!     closing_date: NaiveDate,
//! }
//! ```

use chrono::NaiveDate;
use serde::{Deserializer, Serializer};

use super::{date_from_millis, parse_date, FlexibleVisitor, DATE_FORMAT};

pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format(DATE_FORMAT))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    deserializer.deserialize_any(FlexibleVisitor::new(
        "a YYYY-MM-DD date or epoch milliseconds",
        parse_date,
        date_from_millis,
    ))
}
