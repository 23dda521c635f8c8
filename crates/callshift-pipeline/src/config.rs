//! Configuration for pipeline runs

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the analysis pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Model identifier passed to the LLM provider
    pub model: String,

    /// Per-agent call timeout; expiring calls degrade to absent/default
    pub agent_timeout: Duration,

    /// Maximum number of raw quotes fed into each delta comparison
    pub quote_sample_size: usize,

    /// Evasiveness scoring only sees this many characters from the end of
    /// the transcript, where the Q&A section lives
    pub evasiveness_tail_chars: usize,

    /// Sampling temperature for all agent calls
    pub temperature: f32,

    /// Maximum output tokens per agent call
    pub max_output_tokens: usize,

    /// Overall-signal threshold: mean score above this is Positive, below
    /// its negation is Negative
    pub signal_threshold: f64,

    /// Cache TTL for market price windows
    pub market_cache_ttl: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            agent_timeout: Duration::from_secs(25),
            quote_sample_size: 10,
            evasiveness_tail_chars: 30_000,
            temperature: 0.0,
            max_output_tokens: 8192,
            signal_threshold: 2.0,
            market_cache_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl PipelineConfig {
    /// Create a new configuration builder
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(PipelineError::Config("model must not be empty".to_string()));
        }

        if self.agent_timeout.is_zero() {
            return Err(PipelineError::Config(
                "agent_timeout must be greater than zero".to_string(),
            ));
        }

        if self.quote_sample_size == 0 {
            return Err(PipelineError::Config(
                "quote_sample_size must be greater than 0".to_string(),
            ));
        }

        if self.signal_threshold <= 0.0 {
            return Err(PipelineError::Config(
                "signal_threshold must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for PipelineConfig
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    model: Option<String>,
    agent_timeout: Option<Duration>,
    quote_sample_size: Option<usize>,
    evasiveness_tail_chars: Option<usize>,
    temperature: Option<f32>,
    max_output_tokens: Option<usize>,
    signal_threshold: Option<f64>,
    market_cache_ttl: Option<Duration>,
}

impl PipelineConfigBuilder {
    /// Set the model identifier
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the per-agent call timeout
    pub fn agent_timeout(mut self, timeout: Duration) -> Self {
        self.agent_timeout = Some(timeout);
        self
    }

    /// Set the quote sample size for delta comparisons
    pub fn quote_sample_size(mut self, size: usize) -> Self {
        self.quote_sample_size = Some(size);
        self
    }

    /// Set the evasiveness transcript tail length in characters
    pub fn evasiveness_tail_chars(mut self, chars: usize) -> Self {
        self.evasiveness_tail_chars = Some(chars);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum output tokens per agent call
    pub fn max_output_tokens(mut self, tokens: usize) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// Set the overall-signal threshold
    pub fn signal_threshold(mut self, threshold: f64) -> Self {
        self.signal_threshold = Some(threshold);
        self
    }

    /// Set the market price cache TTL
    pub fn market_cache_ttl(mut self, ttl: Duration) -> Self {
        self.market_cache_ttl = Some(ttl);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<PipelineConfig> {
        let defaults = PipelineConfig::default();

        let config = PipelineConfig {
            model: self.model.unwrap_or(defaults.model),
            agent_timeout: self.agent_timeout.unwrap_or(defaults.agent_timeout),
            quote_sample_size: self.quote_sample_size.unwrap_or(defaults.quote_sample_size),
            evasiveness_tail_chars: self
                .evasiveness_tail_chars
                .unwrap_or(defaults.evasiveness_tail_chars),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_output_tokens: self.max_output_tokens.unwrap_or(defaults.max_output_tokens),
            signal_threshold: self.signal_threshold.unwrap_or(defaults.signal_threshold),
            market_cache_ttl: self.market_cache_ttl.unwrap_or(defaults.market_cache_ttl),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.agent_timeout, Duration::from_secs(25));
        assert_eq!(config.quote_sample_size, 10);
        assert_eq!(config.evasiveness_tail_chars, 30_000);
        assert!(config.temperature.abs() < f32::EPSILON);
        assert!((config.signal_threshold - 2.0).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PipelineConfig::builder()
            .model("gemini-1.5-pro")
            .agent_timeout(Duration::from_secs(40))
            .quote_sample_size(5)
            .build()
            .unwrap();

        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.agent_timeout, Duration::from_secs(40));
        assert_eq!(config.quote_sample_size, 5);
        // Untouched fields fall back to defaults
        assert_eq!(config.evasiveness_tail_chars, 30_000);
    }

    #[test]
    fn test_builder_rejects_empty_model() {
        let result = PipelineConfig::builder().model("").build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_zero_timeout() {
        let result = PipelineConfig::builder()
            .agent_timeout(Duration::ZERO)
            .build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_zero_quote_sample() {
        let result = PipelineConfig::builder().quote_sample_size(0).build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_non_positive_threshold() {
        let result = PipelineConfig::builder().signal_threshold(0.0).build();
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }
}
