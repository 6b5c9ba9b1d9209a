//! Server settings loaded via OrthoConfig.
//!
//! Every field can come from the command line, a configuration file, or a
//! `HABITS_`-prefixed environment variable.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use habit_tracker::domain::{Calendar, CalendarError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("HABITS_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Settings controlling the HTTP listener, storage and calendar.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "HABITS")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
    /// Reference UTC offset in minutes used for day and month boundaries.
    pub utc_offset_minutes: Option<i32>,
    /// Apply pending migrations before serving.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
    }

    /// Calendar for the configured offset; UTC when unset.
    pub fn calendar(&self) -> Result<Calendar, SettingsError> {
        match self.utc_offset_minutes {
            Some(minutes) => Ok(Calendar::with_offset_minutes(minutes)?),
            None => Ok(Calendar::utc()),
        }
    }
}
