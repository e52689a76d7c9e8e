//! Fibonacci retracement levels

use lens_market::OhlcvBar;
use serde::{Deserialize, Serialize};

/// The fixed retracement ratios, ascending
pub const FIB_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// One retracement level: its ratio and the price it lands on
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FibLevel {
    pub ratio: f64,
    pub price: f64,
}

/// The seven retracement levels spanning [min close, max close] of the
/// lookback window
///
/// The ratio-0 level is the support anchor (window low), the ratio-1 level
/// the resistance anchor (window high).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FibonacciLevels {
    pub low: f64,
    pub high: f64,
    pub levels: [FibLevel; 7],
}

impl FibonacciLevels {
    /// Support anchor (level at ratio 0)
    pub fn support(&self) -> f64 {
        self.low
    }

    /// Resistance anchor (level at ratio 1)
    pub fn resistance(&self) -> f64 {
        self.high
    }
}

/// Compute retracement levels over the full supplied window (typically ~252
/// trading days)
///
/// Returns `None` for an empty series.
pub fn compute_fibonacci_levels(bars: &[OhlcvBar]) -> Option<FibonacciLevels> {
    let first = bars.first()?;

    let mut low = first.close;
    let mut high = first.close;
    for bar in bars {
        low = low.min(bar.close);
        high = high.max(bar.close);
    }
    let range = high - low;

    let levels = std::array::from_fn(|i| FibLevel {
        ratio: FIB_RATIOS[i],
        price: low + FIB_RATIOS[i] * range,
    });

    Some(FibonacciLevels { low, high, levels })
}
