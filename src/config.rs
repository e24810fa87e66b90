//! Engine tunables
//!
//! Defaults match production behavior; tests tighten them through the
//! builder setters.

use crate::model::EntityCategory;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-category fetch bound.
    pub fetch_timeout_ms: u64,
    /// Wider bound for the assistants category (internal strategy fan-out).
    pub assistant_fetch_timeout_ms: u64,
    /// Periodic refresh interval.
    pub refresh_interval_ms: u64,
    /// Fixed delay between retry attempts. Intentionally not exponential.
    pub retry_backoff_ms: u64,
    /// Automatic re-attempts after the first failed cycle.
    pub max_retries: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timeout_ms: 5_000,
            assistant_fetch_timeout_ms: 8_000,
            refresh_interval_ms: 120_000,
            retry_backoff_ms: 3_000,
            max_retries: 2,
        }
    }
}

impl Config {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn with_fetch_timeout_ms(mut self, ms: u64) -> Self {
        self.fetch_timeout_ms = ms;
        self
    }

    pub fn with_assistant_fetch_timeout_ms(mut self, ms: u64) -> Self {
        self.assistant_fetch_timeout_ms = ms;
        self
    }

    pub fn with_refresh_interval_ms(mut self, ms: u64) -> Self {
        self.refresh_interval_ms = ms;
        self
    }

    pub fn with_retry_backoff_ms(mut self, ms: u64) -> Self {
        self.retry_backoff_ms = ms;
        self
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn timeout_for(&self, category: EntityCategory) -> Duration {
        match category {
            EntityCategory::Assistants => Duration::from_millis(self.assistant_fetch_timeout_ms),
            _ => Duration::from_millis(self.fetch_timeout_ms),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
