//! Integers written as JSON strings.
//!
//! Use on `i64`/`u64`/`i128`/`u128` fields that clients must not parse as
//! doubles. Deserialization accepts either a string or a JSON number.
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Account {
//!     #[serde(with = "forgeweb_json::int_string")]
//!     id: i64,
//! }
//!
//! let json = serde_json::to_string(&Account { id: 42 }).unwrap();
//! assert_eq!(json, r#"{"id":"42"}"#);
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: fmt::Display,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(IntVisitor(PhantomData))
}

struct IntVisitor<T>(PhantomData<T>);

impl<T> IntVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn parse<E: de::Error>(v: &str) -> Result<T, E> {
        v.trim().parse().map_err(|e| E::custom(format!("invalid integer '{v}': {e}")))
    }
}

impl<'de, T> Visitor<'de> for IntVisitor<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a string holding one")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        Self::parse(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        Self::parse(&v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        Self::parse(&v.to_string())
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> Result<T, E> {
        Self::parse(&v.to_string())
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> Result<T, E> {
        Self::parse(&v.to_string())
    }
}
