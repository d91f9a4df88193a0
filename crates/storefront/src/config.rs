//! Startup configuration read from the environment.

use std::net::SocketAddr;
use std::time::Duration;

pub const BIND_ADDR_ENV: &str = "FASTCHOW_BIND_ADDR";
pub const SESSION_COOKIE_ENV: &str = "FASTCHOW_SESSION_COOKIE";
pub const SSE_KEEPALIVE_ENV: &str = "FASTCHOW_SSE_KEEPALIVE_SECS";
pub const SESSION_IDLE_ENV: &str = "FASTCHOW_SESSION_IDLE_SECS";

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_SESSION_COOKIE: &str = "fastchow_session";
pub const DEFAULT_SSE_KEEPALIVE_SECS: u64 = 15;
pub const DEFAULT_SESSION_IDLE_SECS: u64 = 30 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub bind_addr: SocketAddr,
    pub session_cookie: String,
    pub sse_keepalive: Duration,
    /// Sessions untouched this long are dropped.
    pub session_idle: Duration,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            sse_keepalive: Duration::from_secs(DEFAULT_SSE_KEEPALIVE_SECS),
            session_idle: Duration::from_secs(DEFAULT_SESSION_IDLE_SECS),
        }
    }
}

impl StorefrontConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Invalid values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = match lookup(BIND_ADDR_ENV) {
            None => defaults.bind_addr,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid {BIND_ADDR_ENV}; using {DEFAULT_BIND_ADDR}");
                defaults.bind_addr
            }),
        };

        let session_cookie = match lookup(SESSION_COOKIE_ENV) {
            None => defaults.session_cookie,
            Some(raw) if is_valid_cookie_name(raw.trim()) => raw.trim().to_string(),
            Some(raw) => {
                tracing::warn!(
                    value = %raw,
                    "invalid {SESSION_COOKIE_ENV}; using {DEFAULT_SESSION_COOKIE}"
                );
                defaults.session_cookie
            }
        };

        let sse_keepalive = positive_secs(&lookup, SSE_KEEPALIVE_ENV, DEFAULT_SSE_KEEPALIVE_SECS);
        let session_idle = positive_secs(&lookup, SESSION_IDLE_ENV, DEFAULT_SESSION_IDLE_SECS);

        Self {
            bind_addr,
            session_cookie,
            sse_keepalive,
            session_idle,
        }
    }
}

fn positive_secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    match lookup(key) {
        None => Duration::from_secs(default),
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                tracing::warn!(value = %raw, "invalid {key}; using {default}s");
                Duration::from_secs(default)
            }
        },
    }
}

fn is_valid_cookie_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
