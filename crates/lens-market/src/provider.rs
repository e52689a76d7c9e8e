//! Market data provider trait

use crate::error::Result;
use crate::model::{OhlcvBar, Quote};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for market data providers
///
/// Implementations own their retry policy and request timeouts; callers see
/// either a result or a terminal error.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Get the current quote snapshot for a symbol
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Get daily OHLCV bars for a symbol over [start, end], chronological
    /// ascending
    async fn daily_history(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<OhlcvBar>>;
}
