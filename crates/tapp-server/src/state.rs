use std::sync::Arc;

use tapp_store::{SeedData, TradeStore, UserStore};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared handler state: the two stores plus the active configuration.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub trades: Arc<dyn TradeStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        trades: Arc<dyn TradeStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            users,
            trades,
            config: Arc::new(config),
        }
    }

    /// Build in-memory stores populated as `config` asks.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let seed = if !config.seed {
            SeedData::empty()
        } else if let Some(path) = &config.seed_path {
            SeedData::load(path, &config.schema)?
        } else {
            SeedData::builtin()?
        };
        tracing::info!(
            users = seed.users.len(),
            trades = seed.trades.len(),
            "stores initialised"
        );
        let (users, trades) = seed.into_stores();
        Ok(Self::new(Arc::new(users), Arc::new(trades), config))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("users", &self.users.len().ok())
            .field("trades", &self.trades.len().ok())
            .field("config", &self.config)
            .finish()
    }
}
