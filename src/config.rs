//! Server configuration from environment variables
//!
//! - `EDIT_ROOT_DIR`: directory all `filePath`s are relative to (default: cwd)
//! - `EDIT_HOST`: bind address (default: `127.0.0.1`)
//! - `EDIT_PORT`: bind port (default: `3030`)

use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3030;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid EDIT_PORT {0:?}: expected a number between 0 and 65535")]
    InvalidPort(String),

    #[error("invalid bind address {0}")]
    InvalidAddress(String),

    #[error("root directory {0} does not exist or is not a directory")]
    MissingRoot(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Absolute root directory for edited files
    pub root_dir: PathBuf,
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup (used by tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let current_dir = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let root_dir = match lookup("EDIT_ROOT_DIR").filter(|v| !v.trim().is_empty()) {
            Some(dir) if Path::new(&dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => current_dir.join(dir),
            None => current_dir,
        };

        let host = lookup("EDIT_HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("EDIT_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            root_dir,
            host,
            port,
        })
    }

    /// Fail early if the root directory is unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.root_dir.is_dir() {
            Ok(())
        } else {
            Err(ConfigError::MissingRoot(self.root_dir.clone()))
        }
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigError::InvalidAddress(addr))
    }
}
