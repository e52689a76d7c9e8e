//! Error types for market data operations

use thiserror::Error;

/// Market data specific errors
#[derive(Debug, Error)]
pub enum MarketError {
    /// Invalid symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Data provider has no such instrument
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Transient fetch failure after retries exhausted, or empty series
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable {
        symbol: String,
        reason: String,
    },

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinance(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for market data operations
pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MarketError::SymbolNotFound("INVALID".to_string());
        assert_eq!(err.to_string(), "Symbol not found: INVALID");

        let err = MarketError::DataUnavailable {
            symbol: "AAPL".to_string(),
            reason: "empty historical series".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Data not available for AAPL: empty historical series"
        );
    }
}
