use std::str::FromStr;

use cablewatch_core::validation::rules::{DEFAULT_SAMPLE_LIMIT, MAX_SAMPLE_LIMIT};

/// A configuration variable that is present but cannot be used.
#[derive(Debug, thiserror::Error)]
#[error("{key} has invalid value '{value}'")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Log output format of the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(()),
        }
    }
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// Largest accepted request body. Snapshot imports are the big ones.
    pub max_body_bytes: usize,
    pub db_max_connections: u32,
    /// Raw payloads kept as evidence on each signal.
    pub signal_sample_limit: usize,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: vec!["http://localhost:5173".to_string()],
            request_timeout_secs: 30,
            max_body_bytes: 10 * 1024 * 1024,
            db_max_connections: 20,
            signal_sample_limit: DEFAULT_SAMPLE_LIMIT,
            log_format: LogFormat::Text,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `HOST`                 | `0.0.0.0`               |
    /// | `PORT`                 | `3000`                  |
    /// | `CORS_ORIGINS`         | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    /// | `MAX_BODY_BYTES`       | `10485760`              |
    /// | `DB_MAX_CONNECTIONS`   | `20`                    |
    /// | `SIGNAL_SAMPLE_LIMIT`  | `20` (at most `20`)     |
    /// | `LOG_FORMAT`           | `text`                  |
    ///
    /// `DATABASE_URL` is read separately by the binary.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let entry = |key: &'static str| lookup(key).map(|value| (key, value));

        let sample_entry = entry("SIGNAL_SAMPLE_LIMIT");
        let signal_sample_limit = parse_or(sample_entry.clone(), defaults.signal_sample_limit)?;
        if signal_sample_limit > MAX_SAMPLE_LIMIT {
            let (key, value) = sample_entry.unwrap_or(("SIGNAL_SAMPLE_LIMIT", String::new()));
            return Err(ConfigError { key, value });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(entry("PORT"), defaults.port)?,
            cors_origins: lookup("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.cors_origins),
            request_timeout_secs: parse_or(
                entry("REQUEST_TIMEOUT_SECS"),
                defaults.request_timeout_secs,
            )?,
            max_body_bytes: parse_or(entry("MAX_BODY_BYTES"), defaults.max_body_bytes)?,
            db_max_connections: parse_or(
                entry("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )?,
            signal_sample_limit,
            log_format: parse_or(entry("LOG_FORMAT"), defaults.log_format)?,
        })
    }
}

fn parse_or<T: FromStr>(
    entry: Option<(&'static str, String)>,
    default: T,
) -> Result<T, ConfigError> {
    match entry {
        None => Ok(default),
        Some((key, value)) => {
            let parsed: Result<T, _> = value.trim().parse();
            parsed.map_err(|_| ConfigError { key, value })
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
