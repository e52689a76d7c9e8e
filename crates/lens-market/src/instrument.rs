//! Instrument classification from symbol syntax

use serde::{Deserialize, Serialize};

/// Provider-specific suffix marking a forex pair (e.g. `EURUSD=X`)
pub const FOREX_SUFFIX: &str = "=X";

/// Instrument class derived from symbol syntax
///
/// Crypto pairs (`BTC-USD`) carry no suffix and classify as `Equity`, which
/// gives them the volume-based activity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InstrumentClass {
    Equity,
    Forex,
}

/// A tradable instrument: provider symbol plus its class
///
/// The class is derived once at parse time; downstream code dispatches on it
/// instead of re-inspecting the symbol string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    symbol: String,
    class: InstrumentClass,
}

impl Instrument {
    /// Parse a raw symbol: trims, upper-cases, classifies
    pub fn parse(symbol: &str) -> Self {
        let symbol = symbol.trim().to_uppercase();
        let class = if symbol.ends_with(FOREX_SUFFIX) {
            InstrumentClass::Forex
        } else {
            InstrumentClass::Equity
        };
        Self { symbol, class }
    }

    /// Provider symbol, suffix included (what the data provider expects)
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn class(&self) -> InstrumentClass {
        self.class
    }

    pub fn is_forex(&self) -> bool {
        self.class == InstrumentClass::Forex
    }

    /// Symbol for display: the forex suffix is stripped
    pub fn display_symbol(&self) -> &str {
        self.symbol.strip_suffix(FOREX_SUFFIX).unwrap_or(&self.symbol)
    }
}

impl std::fmt::Display for Instrument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_symbol())
    }
}
