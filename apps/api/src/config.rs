//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable | Default |
//! |---|---|
//! | `TALLY_BIND_ADDR` | `127.0.0.1:8000` |
//! | `TALLY_DB_PATH` | `db.sqlite` |
//! | `TALLY_DB_MAX_CONNECTIONS` | `5` |
//! | `TALLY_DB_CONNECT_TIMEOUT_SECS` | `30` |
//! | `TALLY_ENFORCE_FOREIGN_KEYS` | `false` |

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use tally_db::DbConfig;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,

    /// SQLite database file (`:memory:` for a throwaway store)
    pub database_path: PathBuf,

    /// Connection pool size
    pub max_connections: u32,

    /// How long a request waits for a pooled connection
    pub connect_timeout: Duration,

    /// Reject orders whose customer or item doesn't exist
    pub enforce_foreign_keys: bool,
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("TALLY_BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TALLY_BIND_ADDR".to_string()))?;

        let database_path = lookup("TALLY_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("db.sqlite"));

        let max_connections: u32 = lookup("TALLY_DB_MAX_CONNECTIONS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TALLY_DB_MAX_CONNECTIONS".to_string()))?;

        if max_connections == 0 {
            return Err(ConfigError::InvalidValue(
                "TALLY_DB_MAX_CONNECTIONS".to_string(),
            ));
        }

        let connect_timeout_secs: u64 = lookup("TALLY_DB_CONNECT_TIMEOUT_SECS")
            .unwrap_or_else(|| "30".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TALLY_DB_CONNECT_TIMEOUT_SECS".to_string()))?;

        let enforce_foreign_keys = lookup("TALLY_ENFORCE_FOREIGN_KEYS")
            .unwrap_or_else(|| "false".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("TALLY_ENFORCE_FOREIGN_KEYS".to_string()))?;

        Ok(ApiConfig {
            bind_addr,
            database_path,
            max_connections,
            connect_timeout: Duration::from_secs(connect_timeout_secs),
            enforce_foreign_keys,
        })
    }

    /// Database settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone())
            .max_connections(self.max_connections)
            .min_connections(1)
            .connect_timeout(self.connect_timeout)
            .enforce_foreign_keys(self.enforce_foreign_keys)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:8000".parse().unwrap());
        assert_eq!(config.database_path, PathBuf::from("db.sqlite"));
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert!(!config.enforce_foreign_keys);
    }

    #[test]
    fn test_overrides_flow_into_db_config() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("TALLY_BIND_ADDR", "0.0.0.0:9000"),
            ("TALLY_DB_PATH", "/var/lib/tally/store.sqlite"),
            ("TALLY_DB_MAX_CONNECTIONS", "8"),
            ("TALLY_DB_CONNECT_TIMEOUT_SECS", "3"),
            ("TALLY_ENFORCE_FOREIGN_KEYS", "true"),
        ]))
        .unwrap();

        let db = config.db_config();
        assert_eq!(config.bind_addr.port(), 9000);
        assert_eq!(db.database_path, PathBuf::from("/var/lib/tally/store.sqlite"));
        assert_eq!(db.max_connections, 8);
        assert_eq!(db.connect_timeout, Duration::from_secs(3));
        assert!(db.enforce_foreign_keys);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("TALLY_BIND_ADDR", "not-an-address"),
            ("TALLY_DB_MAX_CONNECTIONS", "lots"),
            ("TALLY_DB_MAX_CONNECTIONS", "0"),
            ("TALLY_DB_CONNECT_TIMEOUT_SECS", "-1"),
            ("TALLY_ENFORCE_FOREIGN_KEYS", "yes please"),
        ] {
            let err = ApiConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert_eq!(err.to_string(), format!("Invalid value for {key}"));
        }
    }
}
