//! Per-request aggregate of computed indicators

use crate::activity::ActivityAnalysis;
use crate::ema::EmaSet;
use crate::fibonacci::{FibonacciLevels, compute_fibonacci_levels};
use lens_market::{InstrumentClass, OhlcvBar};
use serde::{Deserialize, Serialize};

/// Everything the indicator engine derives from one historical series
///
/// Built fresh per request and discarded with the response; unavailable
/// indicators stay explicit (`None` / neutral defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub ema: EmaSet,
    pub activity: ActivityAnalysis,
    pub fibonacci: Option<FibonacciLevels>,
}

impl TechnicalSnapshot {
    /// Compute all indicators for an instrument class over a daily series
    pub fn compute(class: InstrumentClass, bars: &[OhlcvBar], ema_periods: &[usize]) -> Self {
        Self {
            ema: EmaSet::compute(bars, ema_periods),
            activity: ActivityAnalysis::compute(class, bars),
            fibonacci: compute_fibonacci_levels(bars),
        }
    }
}
