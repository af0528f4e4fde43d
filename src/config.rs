//! Runtime configuration, read from the environment (and `.env`).

use anyhow::{bail, Context};
use std::time::Duration;

const DEFAULT_BIND: &str = "127.0.0.1:8080";
const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_LOCK_WAIT_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub database: DbSettings,
}

#[derive(Debug, Clone)]
pub struct DbSettings {
    /// Path of the SQLite database file.
    pub url: String,
    pub pool_size: u32,
    /// Longest a write transaction waits for the database lock before the
    /// request fails as transient.
    pub lock_wait_timeout: Duration,
}

impl DbSettings {
    pub fn new<S: Into<String>>(url: S) -> Self {
        Self {
            url: url.into(),
            pool_size: DEFAULT_POOL_SIZE,
            lock_wait_timeout: Duration::from_millis(DEFAULT_LOCK_WAIT_TIMEOUT_MS),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").context("DATABASE_URL not found")?;
        let bind = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND.to_string());

        let pool_size = match lookup("DB_POOL_SIZE") {
            Some(s) => s.parse::<u32>().context("DB_POOL_SIZE is not a number")?,
            None => DEFAULT_POOL_SIZE,
        };
        if pool_size == 0 {
            bail!("DB_POOL_SIZE must be positive");
        }

        let lock_wait_ms = match lookup("LOCK_WAIT_TIMEOUT_MS") {
            Some(s) => s
                .parse::<u64>()
                .context("LOCK_WAIT_TIMEOUT_MS is not a number")?,
            None => DEFAULT_LOCK_WAIT_TIMEOUT_MS,
        };

        Ok(Self {
            bind,
            database: DbSettings {
                url,
                pool_size,
                lock_wait_timeout: Duration::from_millis(lock_wait_ms),
            },
        })
    }
}
