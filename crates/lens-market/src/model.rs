//! OHLCV bars and quote snapshots

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One time-bucketed summary of trading activity (one bar per trading day)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OhlcvBar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Instantaneous market snapshot for a symbol
///
/// Every numeric field defaults to 0 when the provider omits it; callers can
/// rely on the fields never being NaN or missing. Fields the Yahoo chart API
/// does not carry (market cap, trailing P/E, price/book, dividend yield)
/// stay at their 0 default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub regular_market_price: f64,
    pub regular_market_previous_close: f64,
    pub regular_market_day_high: f64,
    pub regular_market_day_low: f64,
    pub regular_market_volume: u64,
    pub fifty_two_week_high: f64,
    pub fifty_two_week_low: f64,
    pub fifty_day_average: f64,
    pub two_hundred_day_average: f64,
    pub market_cap: f64,
    pub trailing_pe: f64,
    pub price_to_book: f64,
    pub dividend_yield: f64,
    pub regular_market_change_percent: f64,
}

impl Quote {
    /// Build a quote from a chronological daily series
    ///
    /// The last bar supplies the current price, day range and volume; the
    /// rest of the window supplies the 52-week range and the 50/200-day
    /// close averages. Returns `None` for an empty series.
    pub fn from_daily_bars(symbol: &str, bars: &[OhlcvBar]) -> Option<Self> {
        let last = bars.last()?;

        let previous_close = if bars.len() >= 2 {
            bars[bars.len() - 2].close
        } else {
            0.0
        };

        let change_percent = if previous_close > 0.0 {
            (last.close - previous_close) / previous_close * 100.0
        } else {
            0.0
        };

        Some(Self {
            symbol: symbol.to_string(),
            regular_market_price: last.close,
            regular_market_previous_close: previous_close,
            regular_market_day_high: last.high,
            regular_market_day_low: last.low,
            regular_market_volume: last.volume,
            fifty_two_week_high: bars.iter().map(|b| b.high).fold(f64::MIN, f64::max),
            fifty_two_week_low: bars.iter().map(|b| b.low).fold(f64::MAX, f64::min),
            fifty_day_average: trailing_close_average(bars, 50),
            two_hundred_day_average: trailing_close_average(bars, 200),
            regular_market_change_percent: change_percent,
            ..Self::default()
        })
    }
}

/// Mean close over the most recent `window` bars, 0 when the series is
/// shorter than the window (quote fields carry the 0-default policy)
fn trailing_close_average(bars: &[OhlcvBar], window: usize) -> f64 {
    if bars.len() < window || window == 0 {
        return 0.0;
    }
    let tail = &bars[bars.len() - window..];
    tail.iter().map(|b| b.close).sum::<f64>() / window as f64
}
