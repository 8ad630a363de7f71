use tapp_types::{Page, Trade, User};

use crate::error::StoreResult;

/// Ordered collection of users.
///
/// Implementations must be thread-safe. A rename must be atomic with
/// respect to concurrent lookups: a reader sees either the old or the new
/// name, never a partial record.
pub trait UserStore: Send + Sync {
    /// All users whose `id` equals `id`, in store order.
    ///
    /// Returns an empty vector when nothing matches.
    fn find_by_id(&self, id: i64) -> StoreResult<Vec<User>>;

    /// Overwrite the name of the first user with this `id` and return the
    /// updated record.
    ///
    /// Returns [`StoreError::UserNotFound`](crate::StoreError::UserNotFound)
    /// when no user matches.
    fn rename(&self, id: i64, new_name: &str) -> StoreResult<User>;

    /// Snapshot of every user in store order.
    fn all(&self) -> StoreResult<Vec<User>>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

/// Append-only ordered collection of trades.
pub trait TradeStore: Send + Sync {
    /// Trades inside `page`, in insertion order. Out-of-range windows yield
    /// an empty vector.
    fn list(&self, page: Page) -> StoreResult<Vec<Trade>>;

    /// Append `trades` in order as one atomic step and return the full
    /// contents of the store afterwards.
    fn append(&self, trades: Vec<Trade>) -> StoreResult<Vec<Trade>>;

    /// Snapshot of every trade in insertion order.
    fn all(&self) -> StoreResult<Vec<Trade>>;

    fn len(&self) -> StoreResult<usize>;

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }
}
