//! Server configuration from environment variables.

use std::str::FromStr;

use zone_map_database::db::DEFAULT_DATABASE_URL;

/// Where zones are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// The `zones` table in Postgres (`DATABASE_URL`).
    #[default]
    Postgres,
    /// Process memory; contents are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend {other:?}")),
        }
    }
}

/// Settings read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `BIND_ADDR`, default `127.0.0.1`.
    pub bind_addr: String,
    /// `PORT`, default `8080`.
    pub port: u16,
    /// `ZONE_MAP_STORAGE`, default `postgres`.
    pub storage: StorageBackend,
    /// `DATABASE_URL`.
    pub database_url: String,
}

impl ServerConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults
    /// for missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080);

        let storage = lookup("ZONE_MAP_STORAGE").map_or_else(StorageBackend::default, |s| {
            s.parse().unwrap_or_else(|e| {
                log::warn!("{e}, falling back to postgres");
                StorageBackend::Postgres
            })
        });

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        Self {
            bind_addr,
            port,
            storage,
            database_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("BIND_ADDR", "0.0.0.0"),
            ("PORT", "3001"),
            ("ZONE_MAP_STORAGE", "Memory"),
            ("DATABASE_URL", "postgres://u:p@db:5432/zones"),
        ]);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.port, 3001);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.database_url, "postgres://u:p@db:5432/zones");
    }

    #[test]
    fn bad_values_fall_back() {
        let config = config(&[("PORT", "http"), ("ZONE_MAP_STORAGE", "redis")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.storage, StorageBackend::Postgres);
    }
}
