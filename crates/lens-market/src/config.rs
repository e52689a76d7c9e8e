//! Configuration for market data fetching

use crate::error::{MarketError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry/backoff/timeout configuration for the market data adapter
///
/// Backoff is linear: the sleep after attempt `n` is `retry_backoff_base * n`
/// (2s, 4s with the defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Total number of attempts per request
    pub max_retries: u32,

    /// Base duration for the linear backoff between attempts
    pub retry_backoff_base: Duration,

    /// Per-attempt request timeout
    pub request_timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_backoff_base: Duration::from_secs(2),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl FetchConfig {
    /// Create a new configuration builder
    pub fn builder() -> FetchConfigBuilder {
        FetchConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_retries == 0 {
            return Err(MarketError::Config(
                "max_retries must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Backoff duration to sleep after the given 1-based attempt number
    pub fn retry_backoff(&self, attempt: u32) -> Duration {
        self.retry_backoff_base * attempt
    }
}

/// Builder for FetchConfig
#[derive(Debug, Default)]
pub struct FetchConfigBuilder {
    max_retries: Option<u32>,
    retry_backoff_base: Option<Duration>,
    request_timeout: Option<Duration>,
}

impl FetchConfigBuilder {
    /// Set total attempts per request
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = Some(retries);
        self
    }

    /// Set linear backoff base duration
    pub fn retry_backoff_base(mut self, duration: Duration) -> Self {
        self.retry_backoff_base = Some(duration);
        self
    }

    /// Set per-attempt request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<FetchConfig> {
        let defaults = FetchConfig::default();

        let config = FetchConfig {
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
            retry_backoff_base: self
                .retry_backoff_base
                .unwrap_or(defaults.retry_backoff_base),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
