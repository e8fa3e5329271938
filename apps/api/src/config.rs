use std::str::FromStr;

use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on one preflight call; the result is discarded on expiry.
    pub preflight_timeout_ms: u64,
    /// Per-source row limit for a preflight request.
    pub max_source_rows: usize,
    /// Request body cap applied by the router; sized to fit `max_source_rows` on both sides.
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            preflight_timeout_ms: parse_env("PREFLIGHT_TIMEOUT_MS", 5_000)?,
            max_source_rows: parse_env("MAX_SOURCE_ROWS", 100_000)?,
            max_body_bytes: parse_env("MAX_BODY_BYTES", 64 * 1024 * 1024)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.max_body_bytes > 0, "MAX_BODY_BYTES must be greater than zero");
        ensure!(self.max_source_rows > 0, "MAX_SOURCE_ROWS must be greater than zero");
        Ok(())
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
