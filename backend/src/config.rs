//! Server configuration read from the environment (and `.env`, if present).

use crate::import::DEFAULT_BATCH_SIZE;
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got '{value}'")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("{0} is required when STORE_BACKEND=rest")]
    Missing(&'static str),

    #[error("unknown STORE_BACKEND '{0}' (expected 'sqlite' or 'rest')")]
    UnknownBackend(String),
}

/// Where imported reservations are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite { path: String },
    Rest { url: String, api_key: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store: StoreBackend,
    pub batch_size: usize,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// | Env var             | Default           |
    /// |---------------------|-------------------|
    /// | `HOST`              | `127.0.0.1`       |
    /// | `PORT`              | `8080`            |
    /// | `STORE_BACKEND`     | `sqlite`          |
    /// | `DATABASE_PATH`     | `bookings.sqlite` |
    /// | `RECORD_STORE_URL`  | required for rest |
    /// | `RECORD_STORE_KEY`  | required for rest |
    /// | `IMPORT_BATCH_SIZE` | `1000`            |
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", "u16", 8080u16)?;
        let batch_size = parse_or(&lookup, "IMPORT_BATCH_SIZE", "usize", DEFAULT_BATCH_SIZE)?;

        let backend = lookup("STORE_BACKEND").unwrap_or_else(|| "sqlite".to_string());
        let store = match backend.trim().to_ascii_lowercase().as_str() {
            "sqlite" => StoreBackend::Sqlite {
                path: lookup("DATABASE_PATH").unwrap_or_else(|| "bookings.sqlite".to_string()),
            },
            "rest" => StoreBackend::Rest {
                url: lookup("RECORD_STORE_URL").ok_or(ConfigError::Missing("RECORD_STORE_URL"))?,
                api_key: lookup("RECORD_STORE_KEY")
                    .ok_or(ConfigError::Missing("RECORD_STORE_KEY"))?,
            },
            _ => return Err(ConfigError::UnknownBackend(backend)),
        };

        Ok(Self {
            host,
            port,
            store,
            batch_size,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            name,
            expected,
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_local_sqlite() {
        let config = load(&[]).unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.batch_size, 1000);
        assert_eq!(
            config.store,
            StoreBackend::Sqlite {
                path: "bookings.sqlite".into()
            }
        );
    }

    #[test]
    fn rest_backend_needs_url_and_key() {
        let err = load(&[("STORE_BACKEND", "rest")]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RECORD_STORE_URL")));

        let config = load(&[
            ("STORE_BACKEND", "REST"),
            ("RECORD_STORE_URL", "https://project.example.co"),
            ("RECORD_STORE_KEY", "anon"),
        ])
        .unwrap();
        assert!(matches!(config.store, StoreBackend::Rest { .. }));
    }

    #[test]
    fn rejects_bad_numbers_and_backends() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));
        assert!(matches!(
            load(&[("IMPORT_BATCH_SIZE", "-5")]),
            Err(ConfigError::Invalid { .. })
        ));
        assert!(matches!(
            load(&[("STORE_BACKEND", "redis")]),
            Err(ConfigError::UnknownBackend(_))
        ));
    }

    #[test]
    fn overrides_batch_size() {
        assert_eq!(load(&[("IMPORT_BATCH_SIZE", "250")]).unwrap().batch_size, 250);
    }
}
