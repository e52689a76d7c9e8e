//! Exponential moving averages

use lens_market::OhlcvBar;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ta::Next;
use ta::indicators::ExponentialMovingAverage;

/// Default EMA periods requested by the analysis pipeline
pub const DEFAULT_EMA_PERIODS: [usize; 3] = [20, 50, 200];

/// EMA over the supplied closes
///
/// The recurrence seeds from the first close (not an SMA seed) and applies
/// `ema = (close - prev) * 2/(period+1) + prev` for the rest. The `ta`
/// crate's `ExponentialMovingAverage` implements exactly this; the simple
/// seed is kept deliberately for output compatibility. Callers pass only
/// the closes they want considered (typically the most recent `period` of
/// them).
///
/// Returns `None` for an empty slice or a zero period.
pub fn compute_ema(closes: &[f64], period: usize) -> Option<f64> {
    let (&first, rest) = closes.split_first()?;
    let mut ema = ExponentialMovingAverage::new(period).ok()?;

    let mut value = ema.next(first);
    for &close in rest {
        value = ema.next(close);
    }
    Some(value)
}

/// Computed EMA per requested period
///
/// `None` marks a period with insufficient history; availability is
/// independent per period, so a short series can still carry its 20-period
/// EMA while the 200-period one is unavailable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmaSet {
    values: BTreeMap<usize, Option<f64>>,
}

impl EmaSet {
    /// Compute EMAs for each requested period over the most recent `period`
    /// closes of the series
    pub fn compute(bars: &[OhlcvBar], periods: &[usize]) -> Self {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let mut values = BTreeMap::new();
        for &period in periods {
            let value = if period == 0 || closes.len() < period {
                None
            } else {
                compute_ema(&closes[closes.len() - period..], period)
            };
            values.insert(period, value);
        }
        Self { values }
    }

    /// EMA value for a period, `None` when unavailable or never requested
    pub fn value(&self, period: usize) -> Option<f64> {
        self.values.get(&period).copied().flatten()
    }

    /// (period, value) pairs in ascending period order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<f64>)> + '_ {
        self.values.iter().map(|(&p, &v)| (p, v))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
