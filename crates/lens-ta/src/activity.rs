//! Volume and forex activity classification

use lens_market::{InstrumentClass, OhlcvBar};
use serde::{Deserialize, Serialize};

/// Bars considered by the activity analyses
pub const ACTIVITY_LOOKBACK: usize = 20;

const HIGH_RATIO: f64 = 1.5;
const LOW_RATIO: f64 = 0.5;
const TREND_THRESHOLD_PCT: f64 = 1.0;

/// Relative activity level against the lookback average
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityLevel {
    High,
    Low,
    #[default]
    Normal,
}

/// Price trend direction over the lookback window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Bullish,
    Bearish,
    #[default]
    Neutral,
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::High => "HIGH",
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
        })
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Bullish => "BULLISH",
            Self::Bearish => "BEARISH",
            Self::Neutral => "NEUTRAL",
        })
    }
}

/// Volume-based activity for equities (and crypto pairs)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VolumeActivity {
    pub avg_volume: f64,
    pub volume_ratio: f64,
    pub trend: ActivityLevel,
}

/// Range/price-change activity for forex pairs, which report no volume
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForexActivity {
    pub volatility: f64,
    pub price_change: f64,
    pub activity_ratio: f64,
    pub trend: TrendDirection,
    pub level: ActivityLevel,
}

/// Activity analysis, dispatched once per request on the instrument class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityAnalysis {
    Volume(VolumeActivity),
    Forex(ForexActivity),
}

impl ActivityAnalysis {
    pub fn compute(class: InstrumentClass, bars: &[OhlcvBar]) -> Self {
        match class {
            InstrumentClass::Equity => Self::Volume(analyze_volume_activity(bars)),
            InstrumentClass::Forex => Self::Forex(analyze_forex_activity(bars)),
        }
    }
}

/// Classify the most recent bar's volume against the 20-bar average
///
/// Fewer than 20 bars yields the neutral zeroed result.
pub fn analyze_volume_activity(bars: &[OhlcvBar]) -> VolumeActivity {
    if bars.len() < ACTIVITY_LOOKBACK {
        return VolumeActivity::default();
    }
    let window = &bars[bars.len() - ACTIVITY_LOOKBACK..];

    let avg_volume =
        window.iter().map(|b| b.volume as f64).sum::<f64>() / ACTIVITY_LOOKBACK as f64;
    let last_volume = window[ACTIVITY_LOOKBACK - 1].volume as f64;

    if avg_volume <= 0.0 {
        return VolumeActivity {
            avg_volume,
            volume_ratio: 0.0,
            trend: ActivityLevel::Normal,
        };
    }

    let volume_ratio = last_volume / avg_volume;
    VolumeActivity {
        avg_volume,
        volume_ratio,
        trend: classify_level(volume_ratio),
    }
}

/// Classify the most recent bar's |close-open| move against the 20-bar
/// average, plus the trend over the window
///
/// Fewer than 20 bars yields the neutral zeroed result. A zero average move
/// pins the ratio to 0 with a `Normal` level rather than propagating NaN.
pub fn analyze_forex_activity(bars: &[OhlcvBar]) -> ForexActivity {
    if bars.len() < ACTIVITY_LOOKBACK {
        return ForexActivity::default();
    }
    let window = &bars[bars.len() - ACTIVITY_LOOKBACK..];

    let volatility =
        window.iter().map(|b| (b.high - b.low).abs()).sum::<f64>() / ACTIVITY_LOOKBACK as f64;
    let avg_price_change =
        window.iter().map(|b| (b.close - b.open).abs()).sum::<f64>() / ACTIVITY_LOOKBACK as f64;

    let last = &window[ACTIVITY_LOOKBACK - 1];
    let price_change = (last.close - last.open).abs();

    let (activity_ratio, level) = if avg_price_change > 0.0 {
        let ratio = price_change / avg_price_change;
        (ratio, classify_level(ratio))
    } else {
        (0.0, ActivityLevel::Normal)
    };

    let first_close = window[0].close;
    let trend_strength = if first_close == 0.0 {
        0.0
    } else {
        (last.close - first_close) / first_close * 100.0
    };
    let trend = if trend_strength > TREND_THRESHOLD_PCT {
        TrendDirection::Bullish
    } else if trend_strength < -TREND_THRESHOLD_PCT {
        TrendDirection::Bearish
    } else {
        TrendDirection::Neutral
    };

    ForexActivity {
        volatility,
        price_change,
        activity_ratio,
        trend,
        level,
    }
}

fn classify_level(ratio: f64) -> ActivityLevel {
    if ratio >= HIGH_RATIO {
        ActivityLevel::High
    } else if ratio <= LOW_RATIO {
        ActivityLevel::Low
    } else {
        ActivityLevel::Normal
    }
}
