use std::net::IpAddr;

use anyhow::{ensure, Context, Result};

const DEFAULT_MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every value has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: IpAddr,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on concurrently open editing sessions.
    pub max_sessions: usize,
    /// Largest accepted profile photo upload.
    pub max_photo_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            bind_addr: env_or("BIND_ADDR", "127.0.0.1")
                .parse()
                .context("BIND_ADDR must be an IP address")?,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            max_sessions: parse_max_sessions(&env_or("MAX_SESSIONS", "64"))?,
            max_photo_bytes: match std::env::var("MAX_PHOTO_BYTES") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("MAX_PHOTO_BYTES must be a byte count")?,
                Err(_) => DEFAULT_MAX_PHOTO_BYTES,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: IpAddr::from([127, 0, 0, 1]),
            port: 8080,
            rust_log: "info".to_string(),
            max_sessions: 64,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_max_sessions(raw: &str) -> Result<usize> {
    let max = raw
        .parse::<usize>()
        .context("MAX_SESSIONS must be a positive integer")?;
    ensure!(max > 0, "MAX_SESSIONS must be a positive integer, got 0");
    Ok(max)
}
