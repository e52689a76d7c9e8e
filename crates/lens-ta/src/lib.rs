//! Technical indicator engine for marketlens
//!
//! Pure, deterministic computations over OHLCV series:
//!
//! - Exponential moving averages ([`compute_ema`], [`EmaSet`])
//! - Volume and forex activity classification ([`ActivityAnalysis`])
//! - Fibonacci retracement levels ([`compute_fibonacci_levels`])
//! - The per-request aggregate [`TechnicalSnapshot`]
//!
//! No function here performs I/O or panics on short input: insufficient
//! history yields an explicit "unavailable" value (`None` or a neutral
//! zeroed result), never a silent 0.

pub mod activity;
pub mod ema;
pub mod fibonacci;
pub mod snapshot;

// Re-export main types for convenience
pub use activity::{
    ACTIVITY_LOOKBACK, ActivityAnalysis, ActivityLevel, ForexActivity, TrendDirection,
    VolumeActivity, analyze_forex_activity, analyze_volume_activity,
};
pub use ema::{DEFAULT_EMA_PERIODS, EmaSet, compute_ema};
pub use fibonacci::{FIB_RATIOS, FibLevel, FibonacciLevels, compute_fibonacci_levels};
pub use snapshot::TechnicalSnapshot;

#[cfg(test)]
pub(crate) mod testutil {
    use chrono::{TimeZone, Utc};
    use lens_market::OhlcvBar;

    /// Daily bars with the given closes; open tracks the previous close,
    /// high/low bracket the range, volume is constant.
    pub fn bars_from_closes(closes: &[f64]) -> Vec<OhlcvBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                let open = if i == 0 { close } else { closes[i - 1] };
                OhlcvBar {
                    date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                        + chrono::Duration::days(i as i64),
                    open,
                    high: close.max(open) + 0.5,
                    low: close.min(open) - 0.5,
                    close,
                    volume: 1_000,
                }
            })
            .collect()
    }
}
