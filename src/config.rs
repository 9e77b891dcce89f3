use std::{env, str::FromStr};

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing::Level;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub server_addr: String,
    pub db_max_connections: u32,

    /// Mount point for the resources, e.g. `/api`; empty mounts them at the root.
    pub api_prefix: String,

    // Logging
    pub log_dir: String,
    pub log_level: Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 10)?,
            api_prefix: normalize_prefix(&env::var("API_PREFIX").unwrap_or_default()),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            log_level: parse_or("LOG_LEVEL", Level::INFO)?,
        })
    }
}

/// Reads `key` and parses it, falling back to `default` when unset.
fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw:?}")),
        Err(_) => Ok(default),
    }
}

/// `api/` and `/api/` both become `/api`; blank stays blank.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
