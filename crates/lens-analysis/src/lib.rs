//! Analysis pipeline for marketlens
//!
//! Turns a symbol into a structured trading analysis:
//!
//! 1. Fetch quote + historical series through a [`MarketDataProvider`]
//! 2. Compute technical indicators (`lens-ta`)
//! 3. Build a style-parameterized prompt ([`build_prompt`])
//! 4. Request free text from an [`LLMProvider`]
//! 5. Parse the marker-delimited response into titled sections
//!    ([`parse_sections`])
//!
//! The [`AnalysisEngine`] orchestrates the pipeline; each invocation is an
//! independent, stateless request with no cross-request caching.

pub mod engine;
pub mod error;
pub mod prompt;
pub mod result;
pub mod sections;
pub mod style;

// Re-export main types for convenience
pub use engine::{AnalysisEngine, EngineConfig};
pub use error::{AnalysisError, Result};
pub use prompt::build_prompt;
pub use result::{AnalysisBundle, MarketSnapshot};
pub use sections::{AnalysisSection, SECTION_MARKER, parse_sections};
pub use style::AnalysisStyle;

// Re-export the traits the engine is generic over
pub use lens_llm::LLMProvider;
pub use lens_market::MarketDataProvider;
