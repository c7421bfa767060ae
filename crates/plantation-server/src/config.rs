//! Server configuration from environment.

use std::env;
use std::time::Duration;

use plantation_core::CutoffPolicy;

/// Where estates and trees are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

impl StorageBackend {
    /// `memory` or `sqlite`; anything else falls back to SQLite with a warning.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("memory") => Self::Memory,
            Some("sqlite") | None => Self::Sqlite,
            Some(other) => {
                tracing::warn!("Ignoring PLANTATION_STORAGE {:?}, using sqlite", other);
                Self::Sqlite
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub storage: StorageBackend,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Distance reporting when a drone runs out of budget
    pub cutoff_policy: CutoffPolicy,
    /// Wall-clock limit for one flight plan computation
    pub plan_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 8080,
            storage: StorageBackend::Sqlite,
            database_path: "data/plantation.db".to_string(),
            database_max_connections: 5,
            cutoff_policy: CutoffPolicy::default(),
            plan_timeout: Duration::from_millis(10_000),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env::var("PLANTATION_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            storage: StorageBackend::from_setting(env::var("PLANTATION_STORAGE").ok().as_deref()),
            database_path: env::var("PLANTATION_DATABASE_PATH")
                .unwrap_or(defaults.database_path),
            database_max_connections: env::var("PLANTATION_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.database_max_connections),
            cutoff_policy: env::var("PLANTATION_CUTOFF_POLICY")
                .ok()
                .and_then(|s| match s.parse() {
                    Ok(policy) => Some(policy),
                    Err(err) => {
                        tracing::warn!("Ignoring PLANTATION_CUTOFF_POLICY: {}", err);
                        None
                    }
                })
                .unwrap_or(defaults.cutoff_policy),
            plan_timeout: env::var("PLANTATION_PLAN_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.plan_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_setting() {
        assert_eq!(StorageBackend::from_setting(None), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::from_setting(Some("sqlite")), StorageBackend::Sqlite);
        assert_eq!(StorageBackend::from_setting(Some("memory")), StorageBackend::Memory);
        assert_eq!(StorageBackend::from_setting(Some("postgres")), StorageBackend::Sqlite);
    }
}
