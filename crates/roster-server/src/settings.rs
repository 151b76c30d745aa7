//! Server configuration
//!
//! Defaults suit a local PostgreSQL; every value can be overridden through
//! the environment (`DB_HOST`, `DB_PORT`, `BIND_ADDRESS`, ...).

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid BIND_ADDRESS {0:?}")]
    BindAddress(String),

    #[error("DB_MAX_CONNECTIONS must be at least 1")]
    PoolSize,
}

/// Which `EmployeeStore` implementation backs the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone, Deserialize)]
pub struct Config {
    pub db_username: String,
    pub db_password: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_name: String,
    pub db_max_connections: u32,
    pub bind_address: String,
    pub store_backend: StoreBackend,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::default())
    }

    /// Load from an explicit set of variables instead of the process environment.
    #[cfg(test)]
    pub fn from_vars(vars: std::collections::HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(config::Environment::default().source(Some(vars)))
    }

    fn load(env: config::Environment) -> Result<Self, ConfigError> {
        let config: Config = config::Config::builder()
            .set_default("db_username", "postgres")?
            .set_default("db_password", "password")?
            .set_default("db_host", "localhost")?
            .set_default("db_port", 5432)?
            .set_default("db_name", "employees_db")?
            .set_default("db_max_connections", 5)?
            .set_default("bind_address", "0.0.0.0:8080")?
            .set_default("store_backend", "postgres")?
            .set_default("log_format", "pretty")?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        config.bind_addr()?;
        if config.db_max_connections == 0 {
            return Err(ConfigError::PoolSize);
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_address
            .parse()
            .map_err(|_| ConfigError::BindAddress(self.bind_address.clone()))
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_username)
            .password(&self.db_password)
            .database(&self.db_name)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db_username", &self.db_username)
            .field("db_password", &"<redacted>")
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_name", &self.db_name)
            .field("db_max_connections", &self.db_max_connections)
            .field("bind_address", &self.bind_address)
            .field("store_backend", &self.store_backend)
            .field("log_format", &self.log_format)
            .finish()
    }
}
