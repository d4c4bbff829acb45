pub mod loader;

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::LedgerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub roster_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            roster_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, LedgerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup; `load` reads the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LedgerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let server_host = lookup("SERVER_HOST").unwrap_or(defaults.server_host);

        let server_port = match lookup("SERVER_PORT") {
            Some(port) => port.parse().map_err(|e| {
                LedgerError::ConfigError(format!("Invalid SERVER_PORT {:?}: {}", port, e))
            })?,
            None => defaults.server_port,
        };

        let roster_path = lookup("ROSTER_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(AppConfig {
            server_host,
            server_port,
            roster_path,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, LedgerError> {
        format!("{}:{}", self.server_host, self.server_port)
            .parse()
            .map_err(|e| {
                LedgerError::ConfigError(format!(
                    "Invalid listen address {}:{}: {}",
                    self.server_host, self.server_port, e
                ))
            })
    }
}
