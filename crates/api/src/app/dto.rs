use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use validator::Validate;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct WithdrawRequest {
    #[validate(range(min = 1, message = "must be positive"))]
    pub amount: i64,
    #[validate(length(min = 1, message = "required"))]
    pub reference: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OpenAccountRequest {
    #[validate(length(min = 1, message = "required"))]
    pub owner: String,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub deposit: i64,
    /// Accepts `YYYY-MM-DD` or epoch milliseconds.
    #[serde(with = "forgeweb_json::date")]
    pub opened_on: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct StatementQuery {
    #[serde(with = "forgeweb_json::date")]
    pub from: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct AverageQuery {
    pub days: i64,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
    pub id: u64,
    pub owner: String,
    pub balance: i64,
    #[serde(with = "forgeweb_json::date")]
    pub opened_on: NaiveDate,
    #[serde(with = "forgeweb_json::datetime_millis")]
    pub updated_at: NaiveDateTime,
    pub frozen: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementView {
    #[serde(with = "forgeweb_json::int_string")]
    pub account_id: u64,
    #[serde(with = "forgeweb_json::date")]
    pub from: NaiveDate,
    #[serde(with = "forgeweb_json::datetime")]
    pub generated_at: NaiveDateTime,
    pub balance: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageView {
    pub days: i64,
    pub daily_average: i64,
}
