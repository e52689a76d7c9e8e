//! Prompt construction from quote fields and computed indicators

use crate::style::AnalysisStyle;
use lens_market::{Instrument, Quote};
use lens_ta::{ActivityAnalysis, TechnicalSnapshot};

/// Assemble the analysis prompt for one request
///
/// The embed order is fixed: price snapshot, EMA values, the
/// instrument-specific activity block, the seven Fibonacci levels ascending,
/// then the style's output-format instructions. Unavailable values render
/// as `N/A`; nothing here can fail.
pub fn build_prompt(
    quote: &Quote,
    instrument: &Instrument,
    snapshot: &TechnicalSnapshot,
    style: AnalysisStyle,
) -> String {
    let mut prompt = format!(
        "Please analyze this market data for {display}:\n\n\
         Current Price: {price}\n\
         Previous Close: {prev}\n\
         Day Range: {low} - {high}\n\
         Volume: {volume}\n\
         Market Cap: {cap}\n\
         52-Week Range: {wk_low} - {wk_high}\n\
         Change: {change:+.2}%\n\n",
        display = instrument.display_symbol(),
        price = price_or_na(quote.regular_market_price, instrument),
        prev = price_or_na(quote.regular_market_previous_close, instrument),
        low = price_or_na(quote.regular_market_day_low, instrument),
        high = price_or_na(quote.regular_market_day_high, instrument),
        volume = count_or_na(quote.regular_market_volume),
        cap = cap_or_na(quote.market_cap),
        wk_low = price_or_na(quote.fifty_two_week_low, instrument),
        wk_high = price_or_na(quote.fifty_two_week_high, instrument),
        change = quote.regular_market_change_percent,
    );

    prompt.push_str("Technical Indicators:\n");
    for (period, value) in snapshot.ema.iter() {
        let rendered = value.map_or_else(|| "N/A".to_string(), |v| price(v, instrument));
        prompt.push_str(&format!("EMA ({period}): {rendered}\n"));
    }

    match &snapshot.activity {
        ActivityAnalysis::Volume(volume) => {
            prompt.push_str(&format!(
                "\nVolume Activity (20d):\n\
                 Average Volume: {avg:.0}\n\
                 Volume Ratio: {ratio:.2}x\n\
                 Activity: {trend}\n",
                avg = volume.avg_volume,
                ratio = volume.volume_ratio,
                trend = volume.trend,
            ));
        }
        ActivityAnalysis::Forex(forex) => {
            prompt.push_str(&format!(
                "\nMarket Activity (20d):\n\
                 Average Daily Range: {volatility}\n\
                 Current Move: {current}\n\
                 Activity Ratio: {ratio:.2}x\n\
                 Activity Level: {level}\n\
                 Trend: {trend}\n",
                volatility = delta(forex.volatility, instrument),
                current = delta(forex.price_change, instrument),
                ratio = forex.activity_ratio,
                level = forex.level,
                trend = forex.trend,
            ));
        }
    }

    match &snapshot.fibonacci {
        Some(fib) => {
            prompt.push_str("\nFibonacci Retracement Levels (1y):\n");
            let last = fib.levels.len() - 1;
            for (i, level) in fib.levels.iter().enumerate() {
                let anchor = if i == 0 {
                    " (support)"
                } else if i == last {
                    " (resistance)"
                } else {
                    ""
                };
                prompt.push_str(&format!(
                    "{ratio:.1}%{anchor}: {price}\n",
                    ratio = level.ratio * 100.0,
                    price = price(level.price, instrument),
                ));
            }
        }
        None => prompt.push_str("\nFibonacci Retracement Levels (1y): N/A\n"),
    }

    prompt.push('\n');
    prompt.push_str(style.output_instructions());
    prompt
}

/// Currency-marked price: pip precision for forex, cents otherwise
fn price(value: f64, instrument: &Instrument) -> String {
    if instrument.is_forex() {
        format!("${value:.5}")
    } else {
        format!("${value:.2}")
    }
}

/// Quote fields carry 0 when the provider omitted them; render those as N/A
fn price_or_na(value: f64, instrument: &Instrument) -> String {
    if value > 0.0 {
        price(value, instrument)
    } else {
        "N/A".to_string()
    }
}

/// Price delta (range, move): precision without the currency marker
fn delta(value: f64, instrument: &Instrument) -> String {
    if instrument.is_forex() {
        format!("{value:.5}")
    } else {
        format!("{value:.2}")
    }
}

fn count_or_na(value: u64) -> String {
    if value > 0 {
        value.to_string()
    } else {
        "N/A".to_string()
    }
}

fn cap_or_na(value: f64) -> String {
    if value > 0.0 {
        format!("${value:.0}")
    } else {
        "N/A".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lens_market::OhlcvBar;
    use lens_ta::DEFAULT_EMA_PERIODS;

    fn bars_from_closes(closes: &[f64], volume: u64) -> Vec<OhlcvBar> {
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
                    volume,
                }
            })
            .collect()
    }

    fn equity_fixture() -> (Quote, Instrument, TechnicalSnapshot) {
        let instrument = Instrument::parse("AAPL");
        let closes: Vec<f64> = (0..60).map(|i| 200.0 + f64::from(i % 7)).collect();
        let bars = bars_from_closes(&closes, 40_000_000);
        let quote = Quote::from_daily_bars("AAPL", &bars).unwrap();
        let snapshot =
            TechnicalSnapshot::compute(instrument.class(), &bars, &DEFAULT_EMA_PERIODS);
        (quote, instrument, snapshot)
    }

    fn forex_fixture() -> (Quote, Instrument, TechnicalSnapshot) {
        let instrument = Instrument::parse("EURUSD=X");
        let closes: Vec<f64> = (0..252).map(|i| 1.0 + 0.2 * f64::from(i) / 251.0).collect();
        let bars = bars_from_closes(&closes, 0);
        let quote = Quote::from_daily_bars("EURUSD=X", &bars).unwrap();
        let snapshot =
            TechnicalSnapshot::compute(instrument.class(), &bars, &DEFAULT_EMA_PERIODS);
        (quote, instrument, snapshot)
    }

    #[test]
    fn test_equity_prompt_layout() {
        let (quote, instrument, snapshot) = equity_fixture();
        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::General);

        // Deterministic embed order
        let order = [
            "Current Price:",
            "Technical Indicators:",
            "Volume Activity (20d):",
            "Fibonacci Retracement Levels (1y):",
            "[SECTION]Market Position[SECTION]",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|needle| prompt.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_equity_prices_use_two_decimals() {
        let (quote, instrument, snapshot) = equity_fixture();
        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::Technical);
        assert!(prompt.contains("Current Price: $203.00"));
        assert!(prompt.contains("Volume: 40000000"));
    }

    #[test]
    fn test_forex_prompt_strips_suffix_and_uses_pip_precision() {
        let (quote, instrument, snapshot) = forex_fixture();
        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::Technical);

        assert!(prompt.contains("market data for EURUSD:"));
        assert!(!prompt.contains("EURUSD=X"));
        assert!(prompt.contains("Current Price: $1.20000"));
        assert!(prompt.contains("Market Activity (20d):"));
        assert!(prompt.contains("Trend: BULLISH"));
        // Zero forex volume renders as unavailable, never as 0
        assert!(prompt.contains("Volume: N/A"));
    }

    #[test]
    fn test_fibonacci_levels_ascending_with_anchors() {
        let (quote, instrument, snapshot) = forex_fixture();
        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::Technical);

        assert!(prompt.contains("0.0% (support): $1.00000"));
        assert!(prompt.contains("50.0%: $1.10000"));
        assert!(prompt.contains("100.0% (resistance): $1.20000"));

        let support = prompt.find("0.0% (support)").unwrap();
        let mid = prompt.find("50.0%:").unwrap();
        let resistance = prompt.find("100.0% (resistance)").unwrap();
        assert!(support < mid && mid < resistance);
    }

    #[test]
    fn test_missing_indicators_render_as_na() {
        let instrument = Instrument::parse("TSLA");
        let closes: Vec<f64> = (0..30).map(|i| 250.0 + f64::from(i)).collect();
        let bars = bars_from_closes(&closes, 1_000);
        let quote = Quote::from_daily_bars("TSLA", &bars).unwrap();
        let snapshot =
            TechnicalSnapshot::compute(instrument.class(), &bars, &DEFAULT_EMA_PERIODS);

        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::Technical);
        assert!(prompt.contains("EMA (20): $"));
        assert!(prompt.contains("EMA (50): N/A"));
        assert!(prompt.contains("EMA (200): N/A"));
        assert!(prompt.contains("Market Cap: N/A"));
    }

    #[test]
    fn test_empty_history_never_panics() {
        let instrument = Instrument::parse("GBPUSD=X");
        let quote = Quote {
            symbol: "GBPUSD=X".to_string(),
            ..Quote::default()
        };
        let snapshot =
            TechnicalSnapshot::compute(instrument.class(), &[], &DEFAULT_EMA_PERIODS);

        let prompt = build_prompt(&quote, &instrument, &snapshot, AnalysisStyle::MultiHorizon);
        assert!(prompt.contains("Current Price: N/A"));
        assert!(prompt.contains("Fibonacci Retracement Levels (1y): N/A"));
        assert!(prompt.contains("[SECTION]Scalping Signal[SECTION]"));
    }
}
