//! Result aggregates returned to the presentation layer

use crate::sections::AnalysisSection;
use lens_market::{Instrument, OhlcvBar, Quote};
use lens_ta::TechnicalSnapshot;
use serde::Serialize;

/// Quote plus historical series, without the LLM round-trip
///
/// What the original market-data endpoint returned; the CLI `quote` command
/// renders this.
#[derive(Debug, Clone, Serialize)]
pub struct MarketSnapshot {
    pub instrument: Instrument,
    pub quote: Quote,
    pub historical: Vec<OhlcvBar>,
}

/// The per-request aggregate produced by a full analysis
///
/// Created fresh per request and handed to the caller; nothing is cached
/// across requests.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisBundle {
    pub instrument: Instrument,
    pub quote: Quote,
    pub indicators: TechnicalSnapshot,
    /// Raw model output, markers included
    pub analysis: String,
    /// Parsed sections in order of appearance
    pub sections: Vec<AnalysisSection>,
}
