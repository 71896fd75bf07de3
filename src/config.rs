// src/config.rs

use std::{env, path::PathBuf, time::Duration};

use thiserror::Error;

const DEFAULT_ORIGINS: [&str; 3] = [
    "https://excel.officeapps.live.com",
    "https://excel.officeapps.microsoft.com",
    "https://sandbagltd-my.sharepoint.com",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in the environment")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Database connection parameters.
#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub ssl_root_cert: Option<PathBuf>,
    pub ssl_insecure: bool,
    pub max_connections: u32,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("ssl_root_cert", &self.ssl_root_cert)
            .field("ssl_insecure", &self.ssl_insecure)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Process configuration, read once at startup and passed down explicitly.
#[derive(Clone)]
pub struct Config {
    pub db: DbConfig,
    pub api_token: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("db", &self.db)
            .field("api_token", &"<redacted>")
            .field("port", &self.port)
            .field("allowed_origins", &self.allowed_origins)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Blank values count as unset.
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));

        let db = DbConfig {
            host: get("DB_HOST").unwrap_or_else(|| "127.0.0.1".into()),
            port: parse_or("DB_PORT", get("DB_PORT"), 5432)?,
            name: get("DB_NAME").unwrap_or_else(|| "postgres".into()),
            user: get("DB_USER").unwrap_or_else(|| "postgres".into()),
            password: required("DB_PASSWORD")?,
            ssl_root_cert: get("DB_SSL_ROOT_CERT").map(PathBuf::from),
            ssl_insecure: parse_flag("DB_SSL_INSECURE", get("DB_SSL_INSECURE"))?,
            max_connections: parse_or("DB_MAX_CONNECTIONS", get("DB_MAX_CONNECTIONS"), 10)?,
        };

        let allowed_origins: Vec<String> = match get("CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(String::from)
                .collect(),
            None => DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };
        // Credentialed CORS cannot use a wildcard origin.
        if let Some(o) = allowed_origins.iter().find(|o| o.as_str() == "*") {
            return Err(ConfigError::Invalid { name: "CORS_ALLOWED_ORIGINS", value: o.clone() });
        }

        Ok(Self {
            db,
            api_token: required("API_TOKEN")?,
            port: parse_or("PORT", get("PORT"), 8080)?,
            allowed_origins,
            request_timeout: Duration::from_secs(parse_or(
                "REQUEST_TIMEOUT_SECS",
                get("REQUEST_TIMEOUT_SECS"),
                30,
            )?),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

fn parse_flag(name: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else { return Ok(false) };
    match value.to_ascii_lowercase().as_str() {
        "0" | "false" | "no" | "off" => Ok(false),
        "1" | "true" | "yes" | "on" => Ok(true),
        _ => Err(ConfigError::Invalid { name, value }),
    }
}
