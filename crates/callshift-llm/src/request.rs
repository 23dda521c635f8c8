//! Generation request and response types

use serde::{Deserialize, Serialize};

/// Default maximum output tokens when none is specified
pub const DEFAULT_MAX_OUTPUT_TOKENS: usize = 8192;

/// Request for a single-turn LLM generation
///
/// The pipeline never holds a conversation: every call is one system
/// instruction plus one user prompt, optionally constrained to a JSON
/// response schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The user prompt
    pub prompt: String,

    /// Sampling temperature (0.0-2.0 for Gemini)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Maximum tokens to generate
    pub max_output_tokens: usize,

    /// Optional JSON schema constraining the response
    ///
    /// When set, providers that support structured output will return a
    /// response body that conforms to this schema.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    /// Create a builder for generation requests
    pub fn builder(model: impl Into<String>) -> GenerationRequestBuilder {
        GenerationRequestBuilder::new(model)
    }
}

/// Response from an LLM generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text (JSON when a response schema was requested)
    pub text: String,

    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of input tokens
    pub input_tokens: usize,

    /// Number of output tokens
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

/// Builder for GenerationRequest
pub struct GenerationRequestBuilder {
    model: String,
    system: Option<String>,
    prompt: String,
    temperature: Option<f32>,
    max_output_tokens: usize,
    response_schema: Option<serde_json::Value>,
}

impl GenerationRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            system: None,
            prompt: String::new(),
            temperature: None,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            response_schema: None,
        }
    }

    /// Set the system instruction
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the user prompt
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum output tokens
    pub fn max_output_tokens(mut self, max_output_tokens: usize) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    /// Constrain the response to a JSON schema
    pub fn response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Build the request
    pub fn build(self) -> GenerationRequest {
        GenerationRequest {
            model: self.model,
            system: self.system,
            prompt: self.prompt,
            temperature: self.temperature,
            max_output_tokens: self.max_output_tokens,
            response_schema: self.response_schema,
        }
    }
}
