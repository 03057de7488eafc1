use crate::board::{ErrorDisposition, ErrorPolicy};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names - single source of truth
pub mod env_vars {
    /// Base URL of the notes store; `/notes` is appended
    pub const API_URL: &str = "NOTES_API_URL";
    pub const HOST: &str = "NOTES_FRONTEND_HOST";
    pub const PORT: &str = "NOTES_FRONTEND_PORT";
    pub const HTTP_TIMEOUT_SECS: &str = "NOTES_HTTP_TIMEOUT_SECS";
    /// `log`, `surface` or `ignore`
    pub const WRITE_ERRORS: &str = "NOTES_WRITE_ERRORS";
    pub const READ_ERRORS: &str = "NOTES_READ_ERRORS";
}

/// Default values
pub mod defaults {
    pub const API_URL: &str = "http://127.0.0.1:3000/prod";
    pub const HOST: &str = "127.0.0.1";
    pub const PORT: u16 = 9104;
    pub const HTTP_TIMEOUT_SECS: u64 = 30;
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub host: String,
    pub port: u16,
    pub http_timeout: Duration,
    pub error_policy: ErrorPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup(env_vars::API_URL)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::API_URL.to_string());

        let host = lookup(env_vars::HOST)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| defaults::HOST.to_string());

        let mut timeout_secs = parse_or(&lookup, env_vars::HTTP_TIMEOUT_SECS, defaults::HTTP_TIMEOUT_SECS);
        if timeout_secs == 0 {
            log::warn!(
                "{}=0 would fail every request, using {}",
                env_vars::HTTP_TIMEOUT_SECS,
                defaults::HTTP_TIMEOUT_SECS
            );
            timeout_secs = defaults::HTTP_TIMEOUT_SECS;
        }

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            host,
            port: parse_or(&lookup, env_vars::PORT, defaults::PORT),
            http_timeout: Duration::from_secs(timeout_secs),
            error_policy: ErrorPolicy {
                write: parse_or(&lookup, env_vars::WRITE_ERRORS, ErrorDisposition::default()),
                read: parse_or(&lookup, env_vars::READ_ERRORS, ErrorDisposition::default()),
            },
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}
