//! LLM provider trait definition

use crate::{GenerationRequest, GenerationResponse, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Trait for LLM providers
///
/// Implementations of this trait provide access to different LLM services.
/// The pipeline only needs single-turn generation with optional structured
/// output, so the surface is deliberately small.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Generate a completion from the LLM
    ///
    /// # Arguments
    ///
    /// * `request` - The generation request with prompt, system instruction, and parameters
    ///
    /// # Returns
    ///
    /// The generated text and token usage
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationResponse>;

    /// Get the provider name (e.g., "gemini")
    fn name(&self) -> &str;
}

/// Generate a response and deserialize it into `T`
///
/// The request should carry a `response_schema` matching `T` so the provider
/// returns parseable JSON.
///
/// # Errors
///
/// Returns [`crate::LLMError::SerializationError`] if the response text is not
/// valid JSON for `T`, in addition to any provider error.
pub async fn generate_structured<T: DeserializeOwned>(
    provider: &dyn LLMProvider,
    request: GenerationRequest,
) -> Result<T> {
    let response = provider.generate(request).await?;
    Ok(serde_json::from_str(response.text.trim())?)
}
