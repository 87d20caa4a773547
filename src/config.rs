use std::fmt;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },
}

/// Database connection and pool settings.
#[derive(Clone)]
pub struct DbConfig {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    /// Connections kept open even when idle.
    pub min_idle: u32,
    /// Upper bound on concurrently open connections.
    pub max_size: u32,
    /// How long a request blocks waiting for a free connection before failing.
    pub acquire_timeout: Duration,
    /// Applied to every pooled connection as `statement_timeout`.
    pub statement_timeout: Duration,
}

impl DbConfig {
    /// libpq keyword/value connection string. Every value is quoted so
    /// passwords with spaces or quotes survive intact.
    pub fn connection_string(&self) -> String {
        format!(
            "host={} port={} dbname={} user={} password={}",
            quote_conninfo(&self.host),
            self.port,
            quote_conninfo(&self.name),
            quote_conninfo(&self.user),
            quote_conninfo(&self.password),
        )
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("min_idle", &self.min_idle)
            .field("max_size", &self.max_size)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

fn quote_conninfo(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Database
    /// credentials are required; pool and server settings fall back to
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env { lookup };

        let db = DbConfig {
            name: env.required("DB_NAME")?,
            user: env.required("DB_USER")?,
            password: env.required("DB_PASSWORD")?,
            host: env.required("DB_HOST")?,
            port: env.required_parsed("DB_PORT")?,
            min_idle: env.parsed_or("DB_POOL_MIN_IDLE", 1)?,
            max_size: env.parsed_or("DB_POOL_MAX_SIZE", 10)?,
            acquire_timeout: Duration::from_secs(
                env.parsed_or("DB_POOL_ACQUIRE_TIMEOUT_SECS", 5)?,
            ),
            statement_timeout: Duration::from_millis(
                env.parsed_or("DB_STATEMENT_TIMEOUT_MS", 30_000)?,
            ),
        };

        if db.max_size == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_MAX_SIZE",
                value: db.max_size.to_string(),
            });
        }
        if db.min_idle > db.max_size {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_MIN_IDLE",
                value: db.min_idle.to_string(),
            });
        }
        if db.acquire_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "DB_POOL_ACQUIRE_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        if db.statement_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                key: "DB_STATEMENT_TIMEOUT_MS",
                value: "0".to_string(),
            });
        }

        let server = ServerConfig {
            host: env
                .optional("HOST")
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: env.parsed_or("PORT", 8089)?,
        };

        Ok(Self { db, server })
    }
}

struct Env<F> {
    lookup: F,
}

impl<F: Fn(&str) -> Option<String>> Env<F> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn required_parsed<T: std::str::FromStr>(&self, key: &'static str) -> Result<T, ConfigError> {
        let raw = self.required(key)?;
        raw.parse().map_err(|_| ConfigError::Invalid { key, value: raw })
    }

    fn parsed_or<T: std::str::FromStr>(
        &self,
        key: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match self.optional(key) {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid { key, value: raw }),
            None => Ok(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, String> {
        HashMap::from([
            ("DB_NAME", "orders".to_string()),
            ("DB_USER", "order_user".to_string()),
            ("DB_PASSWORD", "secret".to_string()),
            ("DB_HOST", "localhost".to_string()),
            ("DB_PORT", "5432".to_string()),
        ])
    }

    fn load(env: &HashMap<&'static str, String>) -> Result<AppConfig, ConfigError> {
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn loads_required_values_and_defaults() {
        let config = load(&base_env()).expect("config should load");

        assert_eq!(config.db.name, "orders");
        assert_eq!(config.db.port, 5432);
        assert_eq!(config.db.min_idle, 1);
        assert_eq!(config.db.max_size, 10);
        assert_eq!(config.db.acquire_timeout, Duration::from_secs(5));
        assert_eq!(config.db.statement_timeout, Duration::from_millis(30_000));
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8089);
    }

    #[test]
    fn missing_required_value_names_the_key() {
        for key in ["DB_NAME", "DB_USER", "DB_PASSWORD", "DB_HOST", "DB_PORT"] {
            let mut env = base_env();
            env.remove(key);
            assert_eq!(load(&env).unwrap_err(), ConfigError::Missing(key));
        }
    }

    #[test]
    fn blank_required_value_counts_as_missing() {
        let mut env = base_env();
        env.insert("DB_HOST", "   ".to_string());
        assert_eq!(load(&env).unwrap_err(), ConfigError::Missing("DB_HOST"));
    }

    #[test]
    fn unparsable_port_is_rejected() {
        let mut env = base_env();
        env.insert("DB_PORT", "five".to_string());
        assert_eq!(
            load(&env).unwrap_err(),
            ConfigError::Invalid {
                key: "DB_PORT",
                value: "five".to_string()
            }
        );
    }

    #[test]
    fn pool_bounds_are_validated() {
        let mut env = base_env();
        env.insert("DB_POOL_MAX_SIZE", "0".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { key: "DB_POOL_MAX_SIZE", .. })
        ));

        let mut env = base_env();
        env.insert("DB_POOL_MIN_IDLE", "20".to_string());
        env.insert("DB_POOL_MAX_SIZE", "4".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { key: "DB_POOL_MIN_IDLE", .. })
        ));

        let mut env = base_env();
        env.insert("DB_POOL_ACQUIRE_TIMEOUT_SECS", "0".to_string());
        assert!(matches!(
            load(&env),
            Err(ConfigError::Invalid { key: "DB_POOL_ACQUIRE_TIMEOUT_SECS", .. })
        ));
    }

    #[test]
    fn zero_statement_timeout_is_rejected() {
        let mut env = base_env();
        env.insert("DB_STATEMENT_TIMEOUT_MS", "0".to_string());
        assert_eq!(
            load(&env).unwrap_err(),
            ConfigError::Invalid {
                key: "DB_STATEMENT_TIMEOUT_MS",
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn server_settings_can_be_overridden() {
        let mut env = base_env();
        env.insert("HOST", "127.0.0.1".to_string());
        env.insert("PORT", "9000".to_string());

        let config = load(&env).expect("config should load");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn connection_string_quotes_values() {
        let mut env = base_env();
        env.insert("DB_PASSWORD", r"it's a p\ss".to_string());
        let config = load(&env).expect("config should load");

        assert_eq!(
            config.db.connection_string(),
            r"host='localhost' port=5432 dbname='orders' user='order_user' password='it\'s a p\\ss'"
        );
    }

    #[test]
    fn debug_output_hides_password() {
        let config = load(&base_env()).expect("config should load");
        let rendered = format!("{:?}", config.db);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
