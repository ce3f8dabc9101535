//! In-memory account book backing the demo routes.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use anyhow::anyhow;
use chrono::{Local, NaiveDate, NaiveDateTime};
use forgeweb_core::{BusinessCode, DomainError, WebError};

use crate::app::dto::AccountView;

pub const INSUFFICIENT_BALANCE: BusinessCode = BusinessCode::new(4001, "insufficient balance");
pub const ACCOUNT_FROZEN: BusinessCode = BusinessCode::new(4002, "account frozen");
pub const ACCOUNT_NOT_FOUND: BusinessCode = BusinessCode::new(4004, "account not found");

/// Id outside the JavaScript safe-integer range, seeded so clients see it quoted.
pub const LARGE_ACCOUNT_ID: u64 = 9_007_199_254_740_993;

#[derive(Debug, Clone)]
struct Account {
    owner: String,
    balance: i64,
    opened_on: NaiveDate,
    updated_at: NaiveDateTime,
    frozen: bool,
}

#[derive(Debug, Default)]
pub struct AccountBook {
    inner: Mutex<BookState>,
}

#[derive(Debug, Default)]
struct BookState {
    next_id: u64,
    accounts: BTreeMap<u64, Account>,
}

impl AccountBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book with one ordinary account (id 1) and one at [`LARGE_ACCOUNT_ID`].
    pub fn seeded() -> Self {
        let book = Self::new();
        let opened_on = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap_or_default();
        if let Ok(mut state) = book.inner.lock() {
            let now = Local::now().naive_local();
            state.accounts.insert(1, Account {
                owner: "ada".into(),
                balance: 100,
                opened_on,
                updated_at: now,
                frozen: false,
            });
            state.accounts.insert(LARGE_ACCOUNT_ID, Account {
                owner: "grace".into(),
                balance: 5_000,
                opened_on,
                updated_at: now,
                frozen: false,
            });
            state.next_id = 2;
        }
        book
    }

    fn lock(&self) -> Result<MutexGuard<'_, BookState>, WebError> {
        self.inner
            .lock()
            .map_err(|_| WebError::unclassified(anyhow!("account book lock poisoned")))
    }

    pub fn open(&self, owner: String, deposit: i64, opened_on: NaiveDate) -> Result<AccountView, WebError> {
        let mut state = self.lock()?;
        state.next_id = state.next_id.max(1);
        let id = state.next_id;
        state.next_id += 1;

        let account = Account {
            owner,
            balance: deposit,
            opened_on,
            updated_at: Local::now().naive_local(),
            frozen: false,
        };
        let view = view(id, &account);
        state.accounts.insert(id, account);
        tracing::info!(account_id = id, "account opened");
        Ok(view)
    }

    pub fn get(&self, id: u64) -> Result<AccountView, WebError> {
        let state = self.lock()?;
        state
            .accounts
            .get(&id)
            .map(|a| view(id, a))
            .ok_or_else(|| DomainError::info_status(&ACCOUNT_NOT_FOUND).into())
    }

    /// Frozen accounts are a warning; a short balance is an ordinary business outcome.
    pub fn withdraw(&self, id: u64, amount: i64) -> Result<AccountView, WebError> {
        let mut state = self.lock()?;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| WebError::from(DomainError::info_status(&ACCOUNT_NOT_FOUND)))?;

        if account.frozen {
            return Err(DomainError::warn_status(&ACCOUNT_FROZEN)
                .with_source(anyhow!("withdrawal of {amount} attempted on frozen account {id}"))
                .into());
        }
        if account.balance < amount {
            return Err(DomainError::info_status(&INSUFFICIENT_BALANCE).into());
        }

        account.balance -= amount;
        account.updated_at = Local::now().naive_local();
        Ok(view(id, account))
    }

    pub fn freeze(&self, id: u64) -> Result<(), WebError> {
        let mut state = self.lock()?;
        let account = state
            .accounts
            .get_mut(&id)
            .ok_or_else(|| WebError::from(DomainError::info_status(&ACCOUNT_NOT_FOUND)))?;
        account.frozen = true;
        account.updated_at = Local::now().naive_local();
        Ok(())
    }
}

fn view(id: u64, account: &Account) -> AccountView {
    AccountView {
        id,
        owner: account.owner.clone(),
        balance: account.balance,
        opened_on: account.opened_on,
        updated_at: account.updated_at,
        frozen: account.frozen,
    }
}
