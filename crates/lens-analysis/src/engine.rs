//! The analysis orchestrator

use crate::error::{AnalysisError, Result};
use crate::prompt::build_prompt;
use crate::result::{AnalysisBundle, MarketSnapshot};
use crate::sections::parse_sections;
use crate::style::AnalysisStyle;
use chrono::{Duration, Utc};
use lens_llm::{CompletionRequest, LLMProvider, Message};
use lens_market::{Instrument, MarketDataProvider, OhlcvBar, Quote};
use lens_ta::{DEFAULT_EMA_PERIODS, TechnicalSnapshot};
use std::sync::Arc;
use tracing::{debug, info};

/// Engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Model identifier passed to the LLM provider
    pub model: String,

    /// Maximum tokens to generate per analysis
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Lookback window of daily history to fetch
    pub history_days: i64,

    /// EMA periods computed for the prompt
    pub ema_periods: Vec<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            max_tokens: 1000,
            temperature: 0.7,
            history_days: 365,
            ema_periods: DEFAULT_EMA_PERIODS.to_vec(),
        }
    }
}

/// Orchestrates one analysis request end to end
///
/// Stateless across requests: each `analyze` call is an independent
/// pipeline over the two collaborators. Retries live inside the market
/// adapter; the engine surfaces the first terminal failure.
pub struct AnalysisEngine {
    market: Arc<dyn MarketDataProvider>,
    llm: Arc<dyn LLMProvider>,
    config: EngineConfig,
}

impl AnalysisEngine {
    /// Create an engine with the default configuration
    pub fn new(market: Arc<dyn MarketDataProvider>, llm: Arc<dyn LLMProvider>) -> Self {
        Self::with_config(market, llm, EngineConfig::default())
    }

    /// Create an engine with a custom configuration
    pub fn with_config(
        market: Arc<dyn MarketDataProvider>,
        llm: Arc<dyn LLMProvider>,
        config: EngineConfig,
    ) -> Self {
        Self {
            market,
            llm,
            config,
        }
    }

    /// Fetch quote and historical series without generating an analysis
    pub async fn market_data(&self, symbol: &str) -> Result<MarketSnapshot> {
        let instrument = Instrument::parse(symbol);
        let (quote, historical) = self.fetch(&instrument).await?;
        Ok(MarketSnapshot {
            instrument,
            quote,
            historical,
        })
    }

    /// Run the full pipeline: fetch, compute, prompt, generate, parse
    pub async fn analyze(&self, symbol: &str, style: AnalysisStyle) -> Result<AnalysisBundle> {
        let instrument = Instrument::parse(symbol);
        info!(symbol = instrument.symbol(), %style, "starting analysis");

        let (quote, bars) = self.fetch(&instrument).await?;
        let indicators =
            TechnicalSnapshot::compute(instrument.class(), &bars, &self.config.ema_periods);

        let prompt = build_prompt(&quote, &instrument, &indicators, style);
        debug!(chars = prompt.len(), "built analysis prompt");

        let request = CompletionRequest::builder(self.config.model.as_str())
            .system(style.persona())
            .add_message(Message::user(prompt))
            .max_tokens(self.config.max_tokens)
            .temperature(self.config.temperature)
            .build();

        let response = self
            .llm
            .complete(request)
            .await
            .map_err(AnalysisError::from_llm)?;

        let analysis = response.message.content;
        if analysis.trim().is_empty() {
            return Err(AnalysisError::GenerationFailed(
                "model returned empty analysis".to_string(),
            ));
        }

        let sections = parse_sections(&analysis);
        info!(
            symbol = instrument.symbol(),
            sections = sections.len(),
            "analysis complete"
        );

        Ok(AnalysisBundle {
            instrument,
            quote,
            indicators,
            analysis,
            sections,
        })
    }

    /// Quote and history are independent upstream calls, so they run
    /// concurrently; an empty series is terminal here
    async fn fetch(&self, instrument: &Instrument) -> Result<(Quote, Vec<OhlcvBar>)> {
        let symbol = instrument.symbol();
        let end = Utc::now();
        let start = end - Duration::days(self.config.history_days);

        let (quote, bars) = tokio::try_join!(
            self.market.quote(symbol),
            self.market.daily_history(symbol, start, end),
        )
        .map_err(|e| AnalysisError::from_market(symbol, e))?;

        if bars.is_empty() {
            return Err(AnalysisError::DataUnavailable {
                symbol: symbol.to_string(),
                reason: "empty historical series".to_string(),
            });
        }

        Ok((quote, bars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use lens_llm::{CompletionResponse, LLMError, StopReason, TokenUsage};
    use lens_market::MarketError;
    use std::sync::Mutex;

    /// Market fake serving a fixed series (or a fixed error)
    struct FakeMarket {
        bars: Vec<OhlcvBar>,
        fail_with: Option<fn(&str) -> MarketError>,
    }

    impl FakeMarket {
        fn with_closes(closes: &[f64]) -> Self {
            let bars = closes
                .iter()
                .enumerate()
                .map(|(i, &close)| OhlcvBar {
                    date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
                        + Duration::days(i as i64),
                    open: close,
                    high: close + 0.5,
                    low: close - 0.5,
                    close,
                    volume: 1_000,
                })
                .collect();
            Self {
                bars,
                fail_with: None,
            }
        }

        fn failing(fail_with: fn(&str) -> MarketError) -> Self {
            Self {
                bars: Vec::new(),
                fail_with: Some(fail_with),
            }
        }
    }

    #[async_trait]
    impl MarketDataProvider for FakeMarket {
        async fn quote(&self, symbol: &str) -> lens_market::Result<Quote> {
            if let Some(fail) = self.fail_with {
                return Err(fail(symbol));
            }
            Quote::from_daily_bars(symbol, &self.bars)
                .ok_or_else(|| MarketError::SymbolNotFound(symbol.to_string()))
        }

        async fn daily_history(
            &self,
            symbol: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> lens_market::Result<Vec<OhlcvBar>> {
            if let Some(fail) = self.fail_with {
                return Err(fail(symbol));
            }
            Ok(self.bars.clone())
        }
    }

    /// LLM fake returning a canned reply and recording the last request
    struct FakeLLM {
        reply: String,
        last_request: Mutex<Option<CompletionRequest>>,
    }

    impl FakeLLM {
        fn replying(reply: impl Into<String>) -> Self {
            Self {
                reply: reply.into(),
                last_request: Mutex::new(None),
            }
        }

        /// Echoes back exactly the section titles the prompt requested
        fn echoing(style: AnalysisStyle) -> Self {
            let reply = style
                .section_titles()
                .iter()
                .map(|title| format!("[SECTION]{title}[SECTION]analysis body for {title}"))
                .collect::<String>();
            Self::replying(reply)
        }
    }

    #[async_trait]
    impl LLMProvider for FakeLLM {
        async fn complete(
            &self,
            request: CompletionRequest,
        ) -> lens_llm::Result<CompletionResponse> {
            *self.last_request.lock().unwrap() = Some(request);
            Ok(CompletionResponse {
                message: Message::assistant(self.reply.clone()),
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    /// LLM fake that always errors
    struct BrokenLLM;

    #[async_trait]
    impl LLMProvider for BrokenLLM {
        async fn complete(
            &self,
            _request: CompletionRequest,
        ) -> lens_llm::Result<CompletionResponse> {
            Err(LLMError::RequestFailed("HTTP 500: upstream down".to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    fn rising_forex_closes() -> Vec<f64> {
        (0..252).map(|i| 1.0 + 0.2 * f64::from(i) / 251.0).collect()
    }

    #[tokio::test]
    async fn test_analyze_happy_path() {
        let market = Arc::new(FakeMarket::with_closes(&rising_forex_closes()));
        let llm = Arc::new(FakeLLM::echoing(AnalysisStyle::Technical));
        let engine = AnalysisEngine::new(market, llm.clone());

        let bundle = engine
            .analyze("eurusd=x", AnalysisStyle::Technical)
            .await
            .unwrap();

        assert_eq!(bundle.instrument.display_symbol(), "EURUSD");
        assert!(bundle.indicators.fibonacci.is_some());
        assert_eq!(bundle.sections.len(), 3);

        // The request carried the style persona and the built prompt
        let request = llm.last_request.lock().unwrap().take().unwrap();
        assert_eq!(
            request.system.as_deref(),
            Some(AnalysisStyle::Technical.persona())
        );
        assert_eq!(request.max_tokens, 1000);
        assert!(request.messages[0].content.contains("EURUSD"));
    }

    #[tokio::test]
    async fn test_requested_titles_round_trip() {
        for style in [
            AnalysisStyle::General,
            AnalysisStyle::Technical,
            AnalysisStyle::MultiHorizon,
        ] {
            let market = Arc::new(FakeMarket::with_closes(&rising_forex_closes()));
            let llm = Arc::new(FakeLLM::echoing(style));
            let engine = AnalysisEngine::new(market, llm);

            let bundle = engine.analyze("EURUSD=X", style).await.unwrap();
            let parsed: Vec<&str> = bundle.sections.iter().map(|s| s.title.as_str()).collect();
            assert_eq!(parsed, style.section_titles(), "{style}");
        }
    }

    #[tokio::test]
    async fn test_symbol_not_found_surfaces() {
        let market = Arc::new(FakeMarket::failing(|s| {
            MarketError::SymbolNotFound(s.to_string())
        }));
        let engine = AnalysisEngine::new(market, Arc::new(FakeLLM::replying("unused")));

        let err = engine
            .analyze("NOSUCH", AnalysisStyle::Technical)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::SymbolNotFound(_)));
    }

    #[tokio::test]
    async fn test_empty_history_is_data_unavailable() {
        // Quote resolves but the series is empty
        struct EmptyHistory;

        #[async_trait]
        impl MarketDataProvider for EmptyHistory {
            async fn quote(&self, symbol: &str) -> lens_market::Result<Quote> {
                Ok(Quote {
                    symbol: symbol.to_string(),
                    regular_market_price: 1.0,
                    ..Quote::default()
                })
            }

            async fn daily_history(
                &self,
                _symbol: &str,
                _start: DateTime<Utc>,
                _end: DateTime<Utc>,
            ) -> lens_market::Result<Vec<OhlcvBar>> {
                Ok(Vec::new())
            }
        }

        let engine = AnalysisEngine::new(
            Arc::new(EmptyHistory),
            Arc::new(FakeLLM::replying("unused")),
        );
        let err = engine
            .analyze("AAPL", AnalysisStyle::General)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::DataUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_llm_failure_is_generation_failed() {
        let market = Arc::new(FakeMarket::with_closes(&rising_forex_closes()));
        let engine = AnalysisEngine::new(market, Arc::new(BrokenLLM));

        let err = engine
            .analyze("EURUSD=X", AnalysisStyle::Technical)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_empty_generation_is_generation_failed() {
        let market = Arc::new(FakeMarket::with_closes(&rising_forex_closes()));
        let engine = AnalysisEngine::new(market, Arc::new(FakeLLM::replying("   \n ")));

        let err = engine
            .analyze("EURUSD=X", AnalysisStyle::Technical)
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::GenerationFailed(_)));
    }

    #[tokio::test]
    async fn test_market_data_skips_the_llm() {
        let market = Arc::new(FakeMarket::with_closes(&rising_forex_closes()));
        let llm = Arc::new(FakeLLM::replying("unused"));
        let engine = AnalysisEngine::new(market, llm.clone());

        let snapshot = engine.market_data("EURUSD=X").await.unwrap();
        assert_eq!(snapshot.historical.len(), 252);
        assert!(snapshot.quote.regular_market_price > 1.19);
        assert!(llm.last_request.lock().unwrap().is_none());
    }
}
