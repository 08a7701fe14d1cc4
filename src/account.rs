//! # Session Account
//!
//! The application's implementation of [`crate::auth::User`], backed by the
//! `accounts` table. The auth middleware builds one per request through the
//! factory in [`crate::routes::router`] and hydrates it from the session id.

use crate::auth::User;
use crate::db::{accounts, models::Account};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

#[derive(Clone, Debug)]
pub struct SessionAccount {
    pool: SqlitePool,
    account: Option<Account>,
    authenticated: bool,
}

impl SessionAccount {
    /// An empty, unauthenticated user
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            account: None,
            authenticated: false,
        }
    }

    /// A user for an account whose credentials were just checked
    ///
    /// Still unauthenticated until [`crate::auth::authenticate_session`] runs.
    pub fn from_account(pool: SqlitePool, account: Account) -> Self {
        Self {
            pool,
            account: Some(account),
            authenticated: false,
        }
    }

    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }
}

#[async_trait]
impl User for SessionAccount {
    type Id = String;
    type Error = AppError;

    fn is_authenticated(&self) -> bool {
        self.authenticated && self.account.is_some()
    }

    fn login(&mut self) {
        self.authenticated = true;
    }

    fn logout(&mut self) {
        self.authenticated = false;
        self.account = None;
    }

    /// The account id, or an empty string when no account is loaded
    ///
    /// An empty user is never authenticated, so only handlers that skip the
    /// credential check could persist the empty id; the demo handlers build
    /// users with [`SessionAccount::from_account`] before touching the session.
    fn unique_id(&self) -> String {
        self.account
            .as_ref()
            .map(|account| account.id.clone())
            .unwrap_or_default()
    }

    async fn get_by_id(&mut self, id: String) -> Result<(), AppError> {
        let account = accounts::find_by_id(&self.pool, &id).await?;
        self.account = Some(account);
        Ok(())
    }
}
