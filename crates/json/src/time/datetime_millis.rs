//! `NaiveDateTime` as epoch milliseconds.

use chrono::NaiveDateTime;
use serde::ser::Error as _;
use serde::{Deserializer, Serializer};

use super::{datetime_from_millis, datetime_to_millis, parse_datetime, FlexibleVisitor};

pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    let millis = datetime_to_millis(value).map_err(S::Error::custom)?;
    serializer.serialize_i64(millis)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    deserializer.deserialize_any(FlexibleVisitor::new(
        "epoch milliseconds or a YYYY-MM-DD HH:mm:ss date-time",
        parse_datetime,
        datetime_from_millis,
    ))
}

#[cfg(test)]
mod tests {
    use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Transfer {
        #[serde(with = "crate::datetime_millis")]
        booked_at: NaiveDateTime,
        #[serde(with = "crate::datetime")]
        settled_at: NaiveDateTime,
        #[serde(with = "crate::date")]
        value_date: NaiveDate,
        #[serde(with = "crate::date_millis")]
        statement_date: NaiveDate,
    }

    fn sample() -> Transfer {
        let booked = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(9, 30, 0).unwrap();
        Transfer {
            booked_at: booked,
            settled_at: booked,
            value_date: booked.date(),
            statement_date: booked.date(),
        }
    }

    #[test]
    fn each_field_uses_its_own_convention() {
        let t = sample();
        let json = serde_json::to_value(&t).unwrap();

        let booked_millis = Local
            .from_local_datetime(&t.booked_at)
            .earliest()
            .unwrap()
            .timestamp_millis();
        let midnight_millis = Local
            .from_local_datetime(&t.statement_date.and_hms_opt(0, 0, 0).unwrap())
            .earliest()
            .unwrap()
            .timestamp_millis();

        assert_eq!(json["booked_at"], booked_millis);
        assert_eq!(json["settled_at"], "2024-01-15 09:30:00");
        assert_eq!(json["value_date"], "2024-01-15");
        assert_eq!(json["statement_date"], midnight_millis);
    }

    #[test]
    fn every_field_accepts_digits_integers_or_text() {
        let expected = sample();
        let booked_millis = Local
            .from_local_datetime(&expected.booked_at)
            .earliest()
            .unwrap()
            .timestamp_millis();

        let json = format!(
            r#"{{
                "booked_at": "2024-01-15 09:30:00",
                "settled_at": "{booked_millis}",
                "value_date": {booked_millis},
                "statement_date": "2024-01-15"
            }}"#
        );
        let decoded: Transfer = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn malformed_text_is_rejected() {
        let json = r#"{
            "booked_at": "yesterday",
            "settled_at": "2024-01-15 09:30:00",
            "value_date": "2024-01-15",
            "statement_date": "2024-01-15"
        }"#;
        let err = serde_json::from_str::<Transfer>(json).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }
}
