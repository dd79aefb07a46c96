//! Runtime settings loaded from the environment.
//!
//! Supported environment variables:
//! - SIDEWALK_BASE_URL: Sidewalk server base URL
//! - SIDEWALK_HTTP_TIMEOUT_SECS: HTTP request timeout
//! - SIDEWALK_ONBOARDING: start in onboarding mode (`true` or `1`)
//! - SIDEWALK_PERSIST_MAX_RETRIES: retries for the mission completion call
//! - SIDEWALK_PERSIST_BASE_DELAY_MS: first retry delay
//! - SIDEWALK_PERSIST_MAX_DELAY_MS: cap on the retry delay

use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::resilient_persistence::RetryConfig;
use crate::infrastructure::sidewalk_api::{DEFAULT_SIDEWALK_BASE_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub base_url: String,
    pub http_timeout: Duration,
    pub onboarding: bool,
    pub persist_max_retries: u32,
    pub persist_base_delay_ms: u64,
    pub persist_max_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        let retry = RetryConfig::default();
        Self {
            base_url: DEFAULT_SIDEWALK_BASE_URL.to_string(),
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            onboarding: false,
            persist_max_retries: retry.max_retries,
            persist_base_delay_ms: retry.base_delay_ms,
            persist_max_delay_ms: retry.max_delay_ms,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Call after `dotenvy::dotenv()` so `.env` values are visible.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unset keys keep their
    /// defaults; unparsable values are logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup("SIDEWALK_BASE_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = match parse_or(
            &lookup,
            "SIDEWALK_HTTP_TIMEOUT_SECS",
            defaults.http_timeout.as_secs(),
        ) {
            0 => {
                tracing::warn!(
                    default = defaults.http_timeout.as_secs(),
                    "SIDEWALK_HTTP_TIMEOUT_SECS must be at least 1, using default"
                );
                defaults.http_timeout.as_secs()
            }
            secs => secs,
        };

        let onboarding = match lookup("SIDEWALK_ONBOARDING") {
            Some(val) => parse_flag(&val).unwrap_or_else(|| {
                tracing::warn!(val = %val, "SIDEWALK_ONBOARDING is not a boolean, ignoring");
                defaults.onboarding
            }),
            None => defaults.onboarding,
        };

        Self {
            base_url,
            http_timeout: Duration::from_secs(timeout_secs),
            onboarding,
            persist_max_retries: parse_or(
                &lookup,
                "SIDEWALK_PERSIST_MAX_RETRIES",
                defaults.persist_max_retries,
            ),
            persist_base_delay_ms: parse_or(
                &lookup,
                "SIDEWALK_PERSIST_BASE_DELAY_MS",
                defaults.persist_base_delay_ms,
            ),
            persist_max_delay_ms: parse_or(
                &lookup,
                "SIDEWALK_PERSIST_MAX_DELAY_MS",
                defaults.persist_max_delay_ms,
            ),
        }
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.persist_max_retries,
            base_delay_ms: self.persist_base_delay_ms,
            max_delay_ms: self.persist_max_delay_ms.max(self.persist_base_delay_ms),
            ..RetryConfig::default()
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    let Some(val) = lookup(key) else {
        return default;
    };
    match val.trim().parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::warn!(key, val = %val, default = %default, "Invalid value, using default");
            default
        }
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}
