use std::sync::Arc;

use anyhow::anyhow;
use axum::{
    extract::Extension,
    routing::{get, post},
    Json, Router,
};
use chrono::Local;
use forgeweb_core::{ResponseEnvelope, WebError};

use crate::app::dto::{
    AccountView, AverageQuery, AverageView, OpenAccountRequest, StatementQuery, StatementView,
    WithdrawRequest,
};
use crate::app::extract::{ParamPath, ParamQuery, ValidJson};
use crate::app::services::AccountBook;

pub fn router() -> Router {
    Router::new()
        .route("/", post(open_account))
        .route("/:id", get(get_account))
        .route("/:id/withdraw", post(withdraw))
        .route("/:id/freeze", post(freeze))
        .route("/:id/statement", get(statement))
        .route("/:id/average", get(daily_average))
}

pub async fn open_account(
    Extension(book): Extension<Arc<AccountBook>>,
    ValidJson(body): ValidJson<OpenAccountRequest>,
) -> Result<Json<AccountView>, WebError> {
    book.open(body.owner, body.deposit, body.opened_on).map(Json)
}

/// Raw JSON; the envelope middleware wraps it.
pub async fn get_account(
    Extension(book): Extension<Arc<AccountBook>>,
    ParamPath(id): ParamPath<u64>,
) -> Result<Json<AccountView>, WebError> {
    book.get(id).map(Json)
}

/// Explicit envelope; passes through the middleware untouched.
pub async fn withdraw(
    Extension(book): Extension<Arc<AccountBook>>,
    ParamPath(id): ParamPath<u64>,
    ValidJson(body): ValidJson<WithdrawRequest>,
) -> Result<ResponseEnvelope<AccountView>, WebError> {
    tracing::info!(account_id = id, amount = body.amount, reference = %body.reference, "withdrawal requested");
    book.withdraw(id, body.amount).map(ResponseEnvelope::success_with)
}

pub async fn freeze(
    Extension(book): Extension<Arc<AccountBook>>,
    ParamPath(id): ParamPath<u64>,
) -> Result<ResponseEnvelope<()>, WebError> {
    book.freeze(id)?;
    Ok(ResponseEnvelope::success())
}

pub async fn statement(
    Extension(book): Extension<Arc<AccountBook>>,
    ParamPath(id): ParamPath<u64>,
    ParamQuery(query): ParamQuery<StatementQuery>,
) -> Result<Json<StatementView>, WebError> {
    let account = book.get(id)?;
    Ok(Json(StatementView {
        account_id: id,
        from: query.from,
        generated_at: Local::now().naive_local(),
        balance: account.balance,
    }))
}

/// Zero days is a programming-level failure, not a business outcome.
pub async fn daily_average(
    Extension(book): Extension<Arc<AccountBook>>,
    ParamPath(id): ParamPath<u64>,
    ParamQuery(query): ParamQuery<AverageQuery>,
) -> Result<Json<AverageView>, WebError> {
    let account = book.get(id)?;
    let daily_average = account
        .balance
        .checked_div(query.days)
        .ok_or_else(|| anyhow!("division by zero: balance {} over {} days", account.balance, query.days))?;
    Ok(Json(AverageView {
        days: query.days,
        daily_average,
    }))
}
