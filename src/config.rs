//! Runtime configuration read from the environment (and `.env`, via dotenv).

use std::env;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8088";
pub const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: Option<String>,
    pub bind_address: String,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.is_empty());
        let bind_address = lookup("BIND_ADDRESS").unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let pool_size = match lookup("POOL_SIZE") {
            Some(value) => parse_pool_size(&value)?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Config {
            database_url,
            bind_address,
            pool_size,
        })
    }

    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }
}

pub fn parse_pool_size(value: &str) -> Result<u32, ConfigError> {
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::Invalid {
            key: "POOL_SIZE",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.database_url, None);
        assert_eq!(config.bind_address, DEFAULT_BIND_ADDRESS);
        assert_eq!(config.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(
            config.require_database_url(),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
    }

    #[test]
    fn reads_all_keys() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/encountify"),
            ("BIND_ADDRESS", "0.0.0.0:9000"),
            ("POOL_SIZE", "4"),
        ]))
        .unwrap();
        assert_eq!(
            config.require_database_url(),
            Ok("postgres://localhost/encountify")
        );
        assert_eq!(config.bind_address, "0.0.0.0:9000");
        assert_eq!(config.pool_size, 4);
    }

    #[test]
    fn empty_database_url_counts_as_missing() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "")])).unwrap();
        assert!(config.require_database_url().is_err());
    }

    #[test]
    fn rejects_bad_pool_size() {
        for bad in ["0", "-1", "ten"] {
            let err = Config::from_lookup(lookup_from(&[("POOL_SIZE", bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "POOL_SIZE",
                    value: bad.to_string()
                }
            );
        }
    }
}
