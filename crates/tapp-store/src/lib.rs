//! In-memory storage for the trading app.
//!
//! Two ordered collections, users and trades, each behind its own
//! `RwLock`. The stores are plain values owned by whoever constructs them
//! (the server keeps them in its router state); there is no global state.
//!
//! # Design Rules
//!
//! 1. Store order is insertion order; pagination indexes into it.
//! 2. Ids are not unique. Lookups return every match; renames touch the
//!    first one.
//! 3. Trades are append-only. A batch is appended under one write lock.
//! 4. Callers validate records before handing them to a store.

pub mod error;
pub mod memory;
pub mod seed;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryTradeStore, InMemoryUserStore};
pub use seed::SeedData;
pub use traits::{TradeStore, UserStore};
