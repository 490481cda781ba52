//! Runtime configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default: `127.0.0.1`)
//! - `PORT`: bind port (default: `3000`)
//! - `STORAGE_MODE`: `memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
//! - `RUST_LOG`: log filter (default: [`DEFAULT_LOG_FILTER`])

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use thiserror::Error;

pub const DEFAULT_LOG_FILTER: &str = "todo_server=debug,todo_core=debug,tower_http=debug";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name}: '{value}' ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} is required when STORAGE_MODE=postgres")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Storage {
    Memory,
    Postgres { url: String, max_connections: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub addr: SocketAddr,
    pub storage: Storage,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
            storage: Storage::Memory,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let host: IpAddr = parse_or("HOST", get("HOST"), defaults.addr.ip())?;
        let port: u16 = parse_or("PORT", get("PORT"), defaults.addr.port())?;

        let storage = match get("STORAGE_MODE").as_deref() {
            None | Some("memory") | Some("in_memory") => Storage::Memory,
            Some("postgres") => {
                let url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
                let max_connections: u32 =
                    parse_or("DATABASE_MAX_CONNECTIONS", get("DATABASE_MAX_CONNECTIONS"), 5)?;
                if max_connections == 0 {
                    return Err(ConfigError::Invalid {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value: "0".to_string(),
                        reason: "must be greater than 0".to_string(),
                    });
                }
                Storage::Postgres {
                    url,
                    max_connections,
                }
            }
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORAGE_MODE",
                    value: other.to_string(),
                    reason: "expected 'memory' or 'postgres'".to_string(),
                })
            }
        };

        Ok(Self {
            addr: SocketAddr::new(host, port),
            storage,
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(value) => match value.parse() {
            Ok(parsed) => Ok(parsed),
            Err(e) => Err(ConfigError::Invalid {
                name,
                reason: e.to_string(),
                value,
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]).unwrap(), Config::default());
    }

    #[test]
    fn host_and_port_are_read() {
        let config = config_from(&[("HOST", "0.0.0.0"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.addr.to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  ")]).unwrap();
        assert_eq!(config.addr.port(), 3000);
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = config_from(&[("PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config_from(&[("STORAGE_MODE", "postgres")]).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn postgres_storage_is_configured() {
        let config = config_from(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("DATABASE_MAX_CONNECTIONS", "10"),
        ])
        .unwrap();
        assert_eq!(
            config.storage,
            Storage::Postgres {
                url: "postgres://localhost/todo".to_string(),
                max_connections: 10,
            }
        );
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let err = config_from(&[
            ("STORAGE_MODE", "postgres"),
            ("DATABASE_URL", "postgres://localhost/todo"),
            ("DATABASE_MAX_CONNECTIONS", "0"),
        ])
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DATABASE_MAX_CONNECTIONS",
                ..
            }
        ));
    }

    #[test]
    fn unknown_storage_mode_is_rejected() {
        let err = config_from(&[("STORAGE_MODE", "sqlite")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "STORAGE_MODE", .. }));
    }
}
