//! Error types for the analysis pipeline

use lens_llm::LLMError;
use lens_market::MarketError;
use thiserror::Error;

/// Analysis pipeline errors
///
/// The three kinds stay distinguishable so the presentation layer can choose
/// its wording; the engine performs no retries of its own.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Data provider has no such instrument
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Quote or historical data missing after the provider's retries
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// LLM call failed or returned empty text
    #[error("Analysis generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type alias for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    /// Map a market error, keeping the not-found kind and folding everything
    /// else into `DataUnavailable` for the given symbol
    pub fn from_market(symbol: &str, err: MarketError) -> Self {
        match err {
            MarketError::SymbolNotFound(s) | MarketError::InvalidSymbol(s) => {
                Self::SymbolNotFound(s)
            }
            MarketError::DataUnavailable { symbol, reason } => {
                Self::DataUnavailable { symbol, reason }
            }
            other => Self::DataUnavailable {
                symbol: symbol.to_string(),
                reason: other.to_string(),
            },
        }
    }

    /// Any LLM failure surfaces as a generation failure
    pub fn from_llm(err: LLMError) -> Self {
        Self::GenerationFailed(err.to_string())
    }
}
