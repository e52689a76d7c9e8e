//! Yahoo Finance market data adapter

use crate::config::FetchConfig;
use crate::error::{MarketError, Result};
use crate::model::{OhlcvBar, Quote};
use crate::provider::MarketDataProvider;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use tokio::time::{sleep, timeout};
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

/// Market data provider backed by Yahoo Finance
///
/// Each request runs up to `FetchConfig::max_retries` attempts with a
/// per-attempt timeout and linear backoff between attempts. A missing symbol
/// is terminal and is not retried.
pub struct YahooMarketData {
    config: FetchConfig,
}

impl YahooMarketData {
    /// Create an adapter with the default fetch configuration
    pub fn new() -> Self {
        Self {
            config: FetchConfig::default(),
        }
    }

    /// Create an adapter with a custom fetch configuration
    pub fn with_config(config: FetchConfig) -> Self {
        Self { config }
    }

    /// Single quote fetch attempt
    ///
    /// The quote is derived from one year of daily bars, which is the widest
    /// window any derived field (52-week range, 200-day average) needs.
    async fn fetch_quote_once(&self, symbol: &str) -> Result<Quote> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        let response = provider
            .get_quote_range(symbol, "1d", "1y")
            .await
            .map_err(|e| map_yahoo_error(symbol, &e))?;

        let quotes = response
            .quotes()
            .map_err(|e| map_yahoo_error(symbol, &e))?;

        let bars = to_bars(&quotes);
        debug!(symbol, bars = bars.len(), "fetched quote window");

        Quote::from_daily_bars(symbol, &bars)
            .ok_or_else(|| MarketError::SymbolNotFound(symbol.to_string()))
    }

    /// Single history fetch attempt
    async fn fetch_history_once(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OhlcvBar>> {
        let provider = yahoo::YahooConnector::new()
            .map_err(|e| MarketError::YahooFinance(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| MarketError::YahooFinance(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| MarketError::YahooFinance(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| map_yahoo_error(symbol, &e))?;

        let quotes = response
            .quotes()
            .map_err(|e| map_yahoo_error(symbol, &e))?;

        debug!(symbol, bars = quotes.len(), "fetched daily history");
        Ok(to_bars(&quotes))
    }
}

impl Default for YahooMarketData {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataProvider for YahooMarketData {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        let mut last_err = no_attempts(symbol);

        for attempt in 1..=self.config.max_retries {
            match timeout(self.config.request_timeout, self.fetch_quote_once(symbol)).await {
                Ok(Ok(quote)) => return Ok(quote),
                Ok(Err(err @ MarketError::SymbolNotFound(_))) => return Err(err),
                Ok(Err(err)) => {
                    warn!(symbol, attempt, error = %err, "quote fetch failed");
                    last_err = err;
                }
                Err(_) => {
                    warn!(symbol, attempt, "quote fetch timed out");
                    last_err = timed_out(symbol, &self.config);
                }
            }
            if attempt < self.config.max_retries {
                sleep(self.config.retry_backoff(attempt)).await;
            }
        }

        Err(exhausted(symbol, last_err))
    }

    async fn daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OhlcvBar>> {
        let mut last_err = no_attempts(symbol);

        for attempt in 1..=self.config.max_retries {
            match timeout(
                self.config.request_timeout,
                self.fetch_history_once(symbol, start, end),
            )
            .await
            {
                Ok(Ok(bars)) => return Ok(bars),
                Ok(Err(err @ MarketError::SymbolNotFound(_))) => return Err(err),
                Ok(Err(err)) => {
                    warn!(symbol, attempt, error = %err, "history fetch failed");
                    last_err = err;
                }
                Err(_) => {
                    warn!(symbol, attempt, "history fetch timed out");
                    last_err = timed_out(symbol, &self.config);
                }
            }
            if attempt < self.config.max_retries {
                sleep(self.config.retry_backoff(attempt)).await;
            }
        }

        Err(exhausted(symbol, last_err))
    }
}

/// Convert provider quotes into domain bars
fn to_bars(quotes: &[yahoo::Quote]) -> Vec<OhlcvBar> {
    quotes
        .iter()
        .map(|q| OhlcvBar {
            date: DateTime::from_timestamp(q.timestamp as i64, 0).unwrap_or_else(Utc::now),
            open: q.open,
            high: q.high,
            low: q.low,
            close: q.close,
            volume: q.volume,
        })
        .collect()
}

/// An empty data set means the provider has no such instrument; everything
/// else is surfaced as a provider error and retried
fn map_yahoo_error(symbol: &str, err: &yahoo::YahooError) -> MarketError {
    match err {
        yahoo::YahooError::NoResult | yahoo::YahooError::NoQuotes => {
            MarketError::SymbolNotFound(symbol.to_string())
        }
        other => MarketError::YahooFinance(other.to_string()),
    }
}

fn no_attempts(symbol: &str) -> MarketError {
    MarketError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: "no fetch attempts were made".to_string(),
    }
}

fn timed_out(symbol: &str, config: &FetchConfig) -> MarketError {
    MarketError::DataUnavailable {
        symbol: symbol.to_string(),
        reason: format!("request timed out after {:?}", config.request_timeout),
    }
}

/// Final error after all attempts: keep DataUnavailable as-is, wrap anything
/// else so callers always see the retries-exhausted kind
fn exhausted(symbol: &str, last: MarketError) -> MarketError {
    match last {
        err @ MarketError::DataUnavailable { .. } => err,
        other => MarketError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: other.to_string(),
        },
    }
}
