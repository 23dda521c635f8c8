//! LLM provider abstraction layer for callshift-rs
//!
//! This crate provides provider-agnostic abstractions for single-turn LLM
//! generation with structured (JSON schema constrained) output. It includes:
//!
//! - Generation request/response types
//! - Provider trait for LLM implementations
//! - Structured-output helper that deserializes responses into typed values
//! - Concrete provider implementations (behind feature flags)

pub mod error;
pub mod provider;
pub mod request;

// Re-export main types
pub use error::{LLMError, Result};
pub use provider::{LLMProvider, generate_structured};
pub use request::{
    DEFAULT_MAX_OUTPUT_TOKENS, GenerationRequest, GenerationRequestBuilder, GenerationResponse,
    TokenUsage,
};

// Provider implementations (feature-gated)
#[cfg(feature = "gemini")]
pub mod providers;

#[cfg(feature = "gemini")]
pub use providers::{GeminiConfig, GeminiProvider};
