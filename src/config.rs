use std::env;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Deployment environment, read from `APP_ENV` (or `NODE_ENV` on hosts that only set that).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
    Test,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("production") => Environment::Production,
            Some("test") => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
            Environment::Test => "test",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which database access path the process uses
#[derive(Clone, Debug)]
pub enum DataSource {
    /// Direct SQL connection (production)
    Sql { database_url: String },

    /// Hosted REST data API (development / QA / test)
    Rest { url: String, key: String },
}

impl DataSource {
    pub fn kind(&self) -> &'static str {
        match self {
            DataSource::Sql { .. } => "sql",
            DataSource::Rest { .. } => "rest",
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable(s): {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: Environment,

    pub data_source: DataSource,

    pub host: String,

    pub port: u16,

    /// Maximum JSON payload size (in bytes)
    /// Default: 10MB (10 * 1024 * 1024)
    pub max_payload_size: usize,

    /// Pool size for the SQL backend
    pub max_db_connections: u32,

    /// Timeout for calls to the REST backend, in seconds
    pub request_timeout_secs: u64,

    pub log_dir: PathBuf,

    /// Directory served as the static frontend
    pub public_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required environment variables:
    /// - production: DATABASE_URL_PROD
    /// - otherwise: SUPABASE_URL and SUPABASE_KEY
    ///
    /// Optional environment variables:
    /// - APP_ENV / NODE_ENV (default: development)
    /// - HOST (default: 0.0.0.0), PORT (default: 3000)
    /// - MAX_PAYLOAD_SIZE (default: 10485760 = 10MB)
    /// - MAX_DB_CONNECTIONS (default: 5)
    /// - REQUEST_TIMEOUT_SECS (default: 10)
    /// - LOG_DIR (default: logs), PUBLIC_DIR (default: public)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let environment =
            Environment::parse(var("APP_ENV").or_else(|| var("NODE_ENV")).as_deref());

        let data_source = match environment {
            Environment::Production => {
                let database_url =
                    var("DATABASE_URL_PROD").ok_or(ConfigError::Missing(vec!["DATABASE_URL_PROD"]))?;
                DataSource::Sql { database_url }
            }
            Environment::Development | Environment::Test => {
                match (var("SUPABASE_URL"), var("SUPABASE_KEY")) {
                    (Some(url), Some(key)) => DataSource::Rest {
                        url: url.trim_end_matches('/').to_string(),
                        key,
                    },
                    (url, key) => {
                        let mut missing = Vec::new();
                        if url.is_none() {
                            missing.push("SUPABASE_URL");
                        }
                        if key.is_none() {
                            missing.push("SUPABASE_KEY");
                        }
                        return Err(ConfigError::Missing(missing));
                    }
                }
            }
        };

        Ok(Config {
            environment,
            data_source,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "PORT", 3000)?,
            max_payload_size: parse_or(&var, "MAX_PAYLOAD_SIZE", 10 * 1024 * 1024)?,
            max_db_connections: parse_or(&var, "MAX_DB_CONNECTIONS", 5)?,
            request_timeout_secs: parse_or(&var, "REQUEST_TIMEOUT_SECS", 10)?,
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()).into(),
            public_dir: var("PUBLIC_DIR").unwrap_or_else(|| "public".to_string()).into(),
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid { var: key, value }),
        None => Ok(default),
    }
}
