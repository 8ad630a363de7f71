use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tapp_types::{SchemaOptions, DEFAULT_LIMIT};

use crate::error::{ServerError, ServerResult};

/// Server settings, loadable from a TOML file. Every key is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// `limit` used by `GET /trades` when the query omits it.
    pub default_limit: i64,
    /// Largest batch `POST /trades` accepts.
    pub max_batch_size: usize,
    /// Populate the stores with seed data at startup.
    pub seed: bool,
    /// JSON seed file replacing the built-in dataset.
    pub seed_path: Option<PathBuf>,
    pub schema: SchemaOptions,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            default_limit: DEFAULT_LIMIT,
            max_batch_size: 1000,
            seed: true,
            seed_path: None,
            schema: SchemaOptions::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&raw)?;
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
