//! Application state shared by all handlers.

use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, StorageBackend};
use crate::persistence;

use super::{EstateProvider, MemoryProvider, SqliteProvider};

pub struct AppState {
    provider: Arc<dyn EstateProvider>,
    config: Config,
}

impl AppState {
    pub fn new(provider: Arc<dyn EstateProvider>, config: Config) -> Self {
        Self { provider, config }
    }

    /// Build the state for the configured storage backend.
    pub async fn from_config(config: Config) -> Result<Self> {
        let provider: Arc<dyn EstateProvider> = match config.storage {
            StorageBackend::Sqlite => {
                let db = persistence::init_database(
                    &config.database_path,
                    config.database_max_connections,
                )
                .await?;
                Arc::new(SqliteProvider::new(db))
            }
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; estates are lost on restart");
                Arc::new(MemoryProvider::new())
            }
        };
        Ok(Self::new(provider, config))
    }

    pub fn provider(&self) -> &dyn EstateProvider {
        self.provider.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
