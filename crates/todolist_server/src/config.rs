//! Environment-driven server configuration.
//!
//! # Invariants
//! - Empty or whitespace-only variables are treated as unset.
//! - `db_dir` and `log_dir` are absolute once loaded.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOSTNAME: &str = "localhost";
pub const DEFAULT_DB_NAME: &str = "todolistDB";

/// Configuration failure.
#[derive(Debug)]
pub enum ConfigError {
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
    CurrentDir(std::io::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue {
                name,
                value,
                reason,
            } => write!(f, "invalid {name}=`{value}`: {reason}"),
            Self::CurrentDir(err) => write!(f, "cannot resolve current directory: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CurrentDir(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
    /// Host shown in the startup line; not used for binding.
    pub hostname: String,
    pub db_dir: PathBuf,
    pub db_name: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::from_lookup(|name| std::env::var(name).ok(), &cwd)
    }

    /// Loads configuration from `lookup`, resolving relative paths against `cwd`.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PORT` | `3000` |
    /// | `HOSTNAME` | `localhost` |
    /// | `BIND_ADDR` | `0.0.0.0` |
    /// | `DB_DIR` | `cwd` |
    /// | `DB_NAME` | `todolistDB` |
    /// | `LOG_LEVEL` | `todolist_core::default_log_level()` |
    /// | `LOG_DIR` | `cwd/logs` |
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cwd: &Path,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|err| ConfigError::InvalidValue {
                name: "PORT",
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let bind_addr = match var("BIND_ADDR") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|err| ConfigError::InvalidValue {
                name: "BIND_ADDR",
                value: raw.clone(),
                reason: err.to_string(),
            })?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let db_name = var("DB_NAME").unwrap_or_else(|| DEFAULT_DB_NAME.to_string());
        if db_name.contains(['/', '\\']) || db_name == "." || db_name == ".." {
            return Err(ConfigError::InvalidValue {
                name: "DB_NAME",
                value: db_name,
                reason: "must be a plain file stem".to_string(),
            });
        }

        let db_dir = var("DB_DIR")
            .map(|dir| cwd.join(dir))
            .unwrap_or_else(|| cwd.to_path_buf());
        let log_dir = var("LOG_DIR")
            .map(|dir| cwd.join(dir))
            .unwrap_or_else(|| cwd.join("logs"));

        Ok(Self {
            bind_addr,
            port,
            hostname: var("HOSTNAME").unwrap_or_else(|| DEFAULT_HOSTNAME.to_string()),
            db_dir,
            db_name,
            log_level: var("LOG_LEVEL")
                .unwrap_or_else(|| todolist_core::default_log_level().to_string()),
            log_dir,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }

    /// Store file: `<db_dir>/<db_name>.db`.
    pub fn db_path(&self) -> PathBuf {
        self.db_dir.join(format!("{}.db", self.db_name))
    }
}
