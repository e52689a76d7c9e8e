//! Analysis styles: persona, section list and output contract per style

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const GENERAL_PERSONA: &str =
    "You are a professional financial analyst. Format your analysis with [SECTION] markers.";

const TECHNICAL_PERSONA: &str = "You are a technical analysis expert. You read price action, \
moving averages, volume and Fibonacci retracement levels, and you turn them into one clear, \
actionable trading call. Format your analysis with [SECTION] markers.";

const MULTI_HORIZON_PERSONA: &str = "You are a trading analyst covering three horizons at once: \
scalping (minutes to hours), day trading (one session) and swing trading (days to weeks). You \
give an independent, actionable signal for each horizon. Format your analysis with [SECTION] \
markers.";

const GENERAL_INSTRUCTIONS: &str = r"Please provide a detailed analysis in the following format:

[SECTION]Market Position[SECTION]
Analyze the current market position, including market cap and overall standing.

[SECTION]Price Trends[SECTION]
Analyze recent price movements, patterns, and potential future directions.

[SECTION]Key Statistics[SECTION]
Analyze key financial metrics and their implications for investors.

[SECTION]Volume Analysis[SECTION]
Analyze trading volume patterns and what they indicate about market activity.

[SECTION]Market Sentiment[SECTION]
Analyze overall market sentiment and investor perception.

[SECTION]Risks & Opportunities[SECTION]
Identify key risks and potential growth opportunities.

Keep each section concise but informative.";

const TECHNICAL_INSTRUCTIONS: &str = r"Please provide a detailed analysis in the following format:

[SECTION]Technical Summary[SECTION]
Summarize the overall technical picture: trend direction, momentum, and where the price sits
relative to its moving averages.

[SECTION]Trading Signal[SECTION]
SIGNAL: (BUY, SELL, or HOLD)
ENTRY: (entry price)
STOP-LOSS: (stop-loss price)
TAKE-PROFIT: (take-profit price)
RISK:REWARD: (minimum 1:2)
Follow with a short rationale for the signal.

[SECTION]Key Levels[SECTION]
List the support and resistance levels to watch, including the relevant Fibonacci retracement
levels.

Keep each section concise but informative.";

const MULTI_HORIZON_INSTRUCTIONS: &str = r"Please provide a detailed analysis in the following format,
giving an independent signal per horizon:

[SECTION]Scalping Signal[SECTION]
For the next few hours:
SIGNAL: (BUY, SELL, or NEUTRAL)
ENTRY: (entry price)
STOP-LOSS: (stop-loss price)
TAKE-PROFIT: (take-profit price)
RISK:REWARD: (minimum 1:3)
Follow with a short rationale.

[SECTION]Day Trading Signal[SECTION]
For the next trading session, in the same format.

[SECTION]Swing Trading Signal[SECTION]
For the next several days to weeks, in the same format.

Keep each section concise but informative.";

/// The analysis style requested by the caller
///
/// One prompt builder is parameterized by this enum; the styles differ only
/// in persona, requested section titles and the signal contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisStyle {
    /// General financial analysis (market position, sentiment, risks)
    General,
    /// Single-horizon technical analysis with one trading signal
    #[default]
    Technical,
    /// Independent scalp/day/swing signals
    MultiHorizon,
}

impl AnalysisStyle {
    /// System persona sent with every request of this style
    pub fn persona(&self) -> &'static str {
        match self {
            Self::General => GENERAL_PERSONA,
            Self::Technical => TECHNICAL_PERSONA,
            Self::MultiHorizon => MULTI_HORIZON_PERSONA,
        }
    }

    /// The output-format block appended to the prompt
    pub fn output_instructions(&self) -> &'static str {
        match self {
            Self::General => GENERAL_INSTRUCTIONS,
            Self::Technical => TECHNICAL_INSTRUCTIONS,
            Self::MultiHorizon => MULTI_HORIZON_INSTRUCTIONS,
        }
    }

    /// The section titles this style requests, in order
    ///
    /// The model's actual output is authoritative; this list is what the
    /// prompt asks for, not what the parser validates against.
    pub fn section_titles(&self) -> &'static [&'static str] {
        match self {
            Self::General => &[
                "Market Position",
                "Price Trends",
                "Key Statistics",
                "Volume Analysis",
                "Market Sentiment",
                "Risks & Opportunities",
            ],
            Self::Technical => &["Technical Summary", "Trading Signal", "Key Levels"],
            Self::MultiHorizon => &[
                "Scalping Signal",
                "Day Trading Signal",
                "Swing Trading Signal",
            ],
        }
    }
}

impl fmt::Display for AnalysisStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::General => "general",
            Self::Technical => "technical",
            Self::MultiHorizon => "multi-horizon",
        };
        f.write_str(name)
    }
}

impl FromStr for AnalysisStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "general" => Ok(Self::General),
            "technical" => Ok(Self::Technical),
            "multi-horizon" | "multi" => Ok(Self::MultiHorizon),
            other => Err(format!(
                "unknown analysis style '{other}' (expected general, technical or multi-horizon)"
            )),
        }
    }
}
