//! `Vec`-backed stores held behind a `RwLock`.
//!
//! Reads share the lock; renames and appends take it exclusively, so every
//! mutation is atomic with respect to concurrent readers.

use std::sync::RwLock;

use tapp_types::{Page, Trade, User};

use crate::error::{StoreError, StoreResult};
use crate::traits::{TradeStore, UserStore};

/// In-memory [`UserStore`]. Data lives as long as the store value.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with `users`, kept in the given order.
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_id(&self, id: i64) -> StoreResult<Vec<User>> {
        let users = self.users.read().map_err(StoreError::poisoned)?;
        Ok(users.iter().filter(|u| u.id == id).cloned().collect())
    }

    fn rename(&self, id: i64, new_name: &str) -> StoreResult<User> {
        let mut users = self.users.write().map_err(StoreError::poisoned)?;
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::UserNotFound(id))?;
        tracing::debug!(user_id = id, old = %user.name, new = %new_name, "renaming user");
        user.name = new_name.to_string();
        Ok(user.clone())
    }

    fn all(&self) -> StoreResult<Vec<User>> {
        let users = self.users.read().map_err(StoreError::poisoned)?;
        Ok(users.clone())
    }

    fn len(&self) -> StoreResult<usize> {
        let users = self.users.read().map_err(StoreError::poisoned)?;
        Ok(users.len())
    }
}

/// In-memory [`TradeStore`]. Trades are never removed.
#[derive(Debug, Default)]
pub struct InMemoryTradeStore {
    trades: RwLock<Vec<Trade>>,
}

impl InMemoryTradeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trades(trades: Vec<Trade>) -> Self {
        Self {
            trades: RwLock::new(trades),
        }
    }
}

impl TradeStore for InMemoryTradeStore {
    fn list(&self, page: Page) -> StoreResult<Vec<Trade>> {
        let trades = self.trades.read().map_err(StoreError::poisoned)?;
        Ok(trades[page.window(trades.len())].to_vec())
    }

    fn append(&self, new_trades: Vec<Trade>) -> StoreResult<Vec<Trade>> {
        let mut trades = self.trades.write().map_err(StoreError::poisoned)?;
        let added = new_trades.len();
        trades.extend(new_trades);
        tracing::debug!(added, total = trades.len(), "appended trades");
        Ok(trades.clone())
    }

    fn all(&self) -> StoreResult<Vec<Trade>> {
        let trades = self.trades.read().map_err(StoreError::poisoned)?;
        Ok(trades.clone())
    }

    fn len(&self) -> StoreResult<usize> {
        let trades = self.trades.read().map_err(StoreError::poisoned)?;
        Ok(trades.len())
    }
}
