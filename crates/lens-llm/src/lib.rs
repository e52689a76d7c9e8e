//! LLM provider abstraction for marketlens
//!
//! Provider-agnostic types for requesting chat completions:
//!
//! - Message and completion request/response types
//! - The [`LLMProvider`] trait
//! - An OpenAI-compatible provider implementation (behind the `openai`
//!   feature)
//!
//! The analysis pipeline only ever sends a system persona plus one user
//! prompt and reads back free text, so messages here are text-only.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
