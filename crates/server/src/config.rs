//! Environment-driven server configuration.

use std::net::SocketAddr;
use std::str::FromStr;

use linkpeek_core::{DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT_SECS};
use tracing::warn;

/// Server settings, read from `LINKPEEK_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to (`LINKPEEK_ADDR`).
    pub bind_addr: SocketAddr,
    /// Outbound fetch timeout in seconds (`LINKPEEK_FETCH_TIMEOUT`).
    pub fetch_timeout: u64,
    /// Response-size cap in bytes (`LINKPEEK_MAX_BODY_BYTES`).
    pub max_body_bytes: usize,
    /// Optional bearer token gating the endpoint (`LINKPEEK_VIEW_TOKEN`).
    pub view_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            fetch_timeout: DEFAULT_TIMEOUT_SECS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            view_token: None,
        }
    }
}

impl Config {
    /// Reads configuration from the environment. Unset variables keep their
    /// defaults; unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: env_or("LINKPEEK_ADDR", defaults.bind_addr),
            fetch_timeout: env_or("LINKPEEK_FETCH_TIMEOUT", defaults.fetch_timeout),
            max_body_bytes: env_or("LINKPEEK_MAX_BODY_BYTES", defaults.max_body_bytes),
            view_token: std::env::var("LINKPEEK_VIEW_TOKEN")
                .ok()
                .filter(|token| !token.is_empty()),
        }
    }
}

fn env_or<T: FromStr + Copy>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => parse_or(name, &raw, default),
        Err(_) => default,
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, raw: &str, default: T) -> T {
    raw.parse().unwrap_or_else(|_| {
        warn!(variable = name, value = raw, "unparseable value, using default");
        default
    })
}
