//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use quill_core::query::DEFAULT_PAGE_SIZE;
use quill_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    /// Posts per listing page.
    pub page_size: u64,
    /// Origin used for absolute URLs, e.g. `https://blog.example.com`.
    /// Derived from each request's connection info when unset.
    pub public_base_url: Option<String>,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .map(|url| DatabaseConfig {
                url,
                max_connections: parsed(&lookup, "DB_MAX_CONNECTIONS").unwrap_or(20),
                min_connections: parsed(&lookup, "DB_MIN_CONNECTIONS").unwrap_or(2),
                connect_timeout: Duration::from_secs(
                    parsed(&lookup, "DB_CONNECT_TIMEOUT_SECS").unwrap_or(10),
                ),
            });

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            database,
            page_size: parsed(&lookup, "PAGE_SIZE")
                .filter(|size: &u64| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            public_base_url: lookup("PUBLIC_BASE_URL")
                .map(|url| url.trim().trim_end_matches('/').to_string())
                .filter(|url| !url.is_empty()),
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database.is_none());
        assert_eq!(config.page_size, 20);
        assert!(config.public_base_url.is_none());
        assert!(!config.telemetry.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("DATABASE_URL", "postgres://quill@localhost/quill"),
            ("DB_MAX_CONNECTIONS", "50"),
            ("PAGE_SIZE", "5"),
            ("PUBLIC_BASE_URL", "https://blog.example.com/"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        let db = config.database.unwrap();
        assert_eq!(db.max_connections, 50);
        assert_eq!(db.min_connections, 2);
        assert_eq!(config.page_size, 5);
        assert_eq!(config.public_base_url.as_deref(), Some("https://blog.example.com"));
        assert!(config.telemetry.json_logs);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config(&[("PORT", "http"), ("PAGE_SIZE", "0"), ("DATABASE_URL", " ")]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.page_size, 20);
        assert!(config.database.is_none());
    }
}
