//! Gateway configuration parsed from environment variables.

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_FORWARD_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FORWARD_CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL required")]
    MissingDatabaseUrl,
    #[error("invalid {var}: {value}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub port: u16,
    /// Base URL of the external persistence/attachment service.
    pub api_url: String,
    pub database_url: String,
    pub upload_dir: String,
    pub db_max_connections: u32,
    pub forward_timeout_secs: u64,
    pub forward_connect_timeout_secs: u64,
}

impl GatewayConfig {
    /// Build typed config from the process environment.
    ///
    /// Required:
    /// - `DATABASE_URL`
    ///
    /// Optional:
    /// - `PORT`: listen port, default 5000
    /// - `API_URL`: persistence service base URL, default `http://localhost:8000`
    /// - `UPLOAD_DIR`: resume/attachment directory, default `uploads`
    /// - `DB_MAX_CONNECTIONS`: pool size, default 5
    /// - `FORWARD_TIMEOUT_SECS` / `FORWARD_CONNECT_TIMEOUT_SECS`: defaults 10 / 5
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is absent or `PORT` does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;
        let api_url = normalize_base_url(std::env::var("API_URL").ok().as_deref());
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.into());

        Ok(Self {
            port,
            api_url,
            database_url,
            upload_dir,
            db_max_connections: env_parse("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
            forward_timeout_secs: env_parse("FORWARD_TIMEOUT_SECS", DEFAULT_FORWARD_TIMEOUT_SECS),
            forward_connect_timeout_secs: env_parse(
                "FORWARD_CONNECT_TIMEOUT_SECS",
                DEFAULT_FORWARD_CONNECT_TIMEOUT_SECS,
            ),
        })
    }
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(v) => v.parse().map_err(|_| ConfigError::Invalid { var: "PORT", value: v.to_string() }),
    }
}

/// Base URL with any trailing slash trimmed so path joins stay predictable.
fn normalize_base_url(raw: Option<&str>) -> String {
    raw.unwrap_or(DEFAULT_API_URL).trim_end_matches('/').to_string()
}

/// Parse an optional numeric variable, falling back to `default` when unset
/// or unparseable.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
