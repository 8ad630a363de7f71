//! Initial dataset loaded into the stores at startup.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tapp_types::{validate_list, Loc, SchemaOptions, Trade, User};

use crate::error::StoreResult;
use crate::memory::{InMemoryTradeStore, InMemoryUserStore};

const BUILTIN_SEED: &str = include_str!("seed.json");

/// Users and trades to populate fresh stores with.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeedData {
    pub users: Vec<User>,
    pub trades: Vec<Trade>,
}

#[derive(Deserialize)]
struct RawSeed {
    #[serde(default)]
    users: Value,
    #[serde(default)]
    trades: Value,
}

impl SeedData {
    /// The dataset compiled into the binary.
    pub fn builtin() -> StoreResult<Self> {
        Self::from_json_str(BUILTIN_SEED, &SchemaOptions::default())
    }

    /// Empty stores.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse `{"users": [...], "trades": [...]}` and validate every record.
    ///
    /// A missing section is treated as empty.
    pub fn from_json_str(raw: &str, options: &SchemaOptions) -> StoreResult<Self> {
        let raw: RawSeed = serde_json::from_str(raw)?;
        let users = section::<User>(&raw.users, "users", options)?;
        let trades = section::<Trade>(&raw.trades, "trades", options)?;
        Ok(Self { users, trades })
    }

    pub fn load(path: &Path, options: &SchemaOptions) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let seed = Self::from_json_str(&raw, options)?;
        tracing::info!(
            path = %path.display(),
            users = seed.users.len(),
            trades = seed.trades.len(),
            "loaded seed file"
        );
        Ok(seed)
    }

    /// Build the two stores from this dataset.
    pub fn into_stores(self) -> (InMemoryUserStore, InMemoryTradeStore) {
        (
            InMemoryUserStore::with_users(self.users),
            InMemoryTradeStore::with_trades(self.trades),
        )
    }
}

fn section<T: tapp_types::Schema>(
    value: &Value,
    name: &str,
    options: &SchemaOptions,
) -> StoreResult<Vec<T>> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    Ok(validate_list::<T>(value, &Loc::part(name), options, None)?)
}
