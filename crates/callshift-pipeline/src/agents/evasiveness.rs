//! Evasiveness scoring agent

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::prompts::evasiveness_schema;
use crate::quarter::FiscalQuarter;
use crate::transcript::tail_chars;
use callshift_llm::{GenerationRequest, LLMProvider, generate_structured};
use callshift_prompt::PromptRegistry;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Score returned when the call fails in any way
///
/// Fail-open: a missing score must not make the payload look either direct
/// or evasive, so the middle of the band is the safe default.
pub const NEUTRAL_EVASIVENESS: f64 = 5.0;

#[derive(Debug, Deserialize)]
struct EvasivenessResponse {
    score: f64,
    reasoning: String,
}

/// Scores executive directness in the current quarter's Q&A
///
/// Only the transcript tail is examined; the Q&A section sits at the end of
/// a call.
pub struct EvasivenessAgent {
    provider: Arc<dyn LLMProvider>,
    prompts: Arc<PromptRegistry>,
    config: PipelineConfig,
}

impl EvasivenessAgent {
    /// Create the agent
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        prompts: Arc<PromptRegistry>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            provider,
            prompts,
            config,
        }
    }

    /// Score the transcript, 0 (very direct) to 10 (actively evasive)
    ///
    /// Timeouts, transport failures, and unparseable output all resolve to
    /// [`NEUTRAL_EVASIVENESS`]. Only a template failure is an error.
    #[instrument(skip(self, transcript), fields(quarter = %quarter))]
    pub async fn score(
        &self,
        transcript: &str,
        ticker: &str,
        quarter: &FiscalQuarter,
    ) -> Result<f64> {
        let system = self.prompts.render("shift.system.evasiveness", &json!({}))?;
        let prompt = self.prompts.render(
            "shift.user.evasiveness",
            &json!({
                "company": ticker,
                "quarter": quarter.label(),
                "transcript_tail": tail_chars(transcript, self.config.evasiveness_tail_chars),
            }),
        )?;

        let request = GenerationRequest::builder(&self.config.model)
            .system(system)
            .prompt(prompt)
            .temperature(self.config.temperature)
            .max_output_tokens(self.config.max_output_tokens)
            .response_schema(evasiveness_schema())
            .build();

        let call = generate_structured::<EvasivenessResponse>(self.provider.as_ref(), request);
        match tokio::time::timeout(self.config.agent_timeout, call).await {
            Ok(Ok(response)) => {
                let score = response.score.clamp(0.0, 10.0);
                debug!(score, reasoning = %response.reasoning, "evasiveness scored");
                Ok(score)
            }
            Ok(Err(e)) => {
                warn!(error = %e, "evasiveness scoring failed, defaulting to {NEUTRAL_EVASIVENESS}");
                Ok(NEUTRAL_EVASIVENESS)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.agent_timeout.as_secs(),
                    "evasiveness scoring timed out, defaulting to {NEUTRAL_EVASIVENESS}"
                );
                Ok(NEUTRAL_EVASIVENESS)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::register_prompts;
    use async_trait::async_trait;
    use callshift_llm::{GenerationResponse, TokenUsage};
    use std::sync::Mutex;
    use std::time::Duration;

    struct CannedProvider {
        text: String,
        last_prompt: Mutex<String>,
    }

    impl CannedProvider {
        fn new(text: impl Into<String>) -> Self {
            Self {
                text: text.into(),
                last_prompt: Mutex::new(String::new()),
            }
        }
    }

    #[async_trait]
    impl LLMProvider for CannedProvider {
        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> callshift_llm::Result<GenerationResponse> {
            *self.last_prompt.lock().unwrap() = request.prompt;
            Ok(GenerationResponse {
                text: self.text.clone(),
                usage: TokenUsage::default(),
            })
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl LLMProvider for HangingProvider {
        async fn generate(
            &self,
            _request: GenerationRequest,
        ) -> callshift_llm::Result<GenerationResponse> {
            std::future::pending().await
        }

        fn name(&self) -> &str {
            "hanging"
        }
    }

    fn registry() -> Arc<PromptRegistry> {
        let registry = PromptRegistry::new();
        register_prompts(&registry).unwrap();
        Arc::new(registry)
    }

    fn config() -> PipelineConfig {
        PipelineConfig::builder()
            .agent_timeout(Duration::from_millis(50))
            .evasiveness_tail_chars(20)
            .build()
            .unwrap()
    }

    fn quarter() -> FiscalQuarter {
        "Q3_2026".parse().unwrap()
    }

    #[tokio::test]
    async fn test_score_parses_response() {
        let agent = EvasivenessAgent::new(
            Arc::new(CannedProvider::new(
                r#"{"score": 6.5, "reasoning": "deflected margin questions twice"}"#,
            )),
            registry(),
            config(),
        );

        let score = agent.score("transcript", "SBI", &quarter()).await.unwrap();
        assert!((score - 6.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_out_of_band_score_is_clamped() {
        let agent = EvasivenessAgent::new(
            Arc::new(CannedProvider::new(
                r#"{"score": 14.0, "reasoning": "very evasive"}"#,
            )),
            registry(),
            config(),
        );

        let score = agent.score("transcript", "SBI", &quarter()).await.unwrap();
        assert!((score - 10.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_parse_failure_defaults_to_neutral() {
        let agent = EvasivenessAgent::new(
            Arc::new(CannedProvider::new("no json here")),
            registry(),
            config(),
        );

        let score = agent.score("transcript", "SBI", &quarter()).await.unwrap();
        assert!((score - NEUTRAL_EVASIVENESS).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_timeout_defaults_to_neutral() {
        let agent = EvasivenessAgent::new(Arc::new(HangingProvider), registry(), config());

        let score = agent.score("transcript", "SBI", &quarter()).await.unwrap();
        assert!((score - NEUTRAL_EVASIVENESS).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_only_the_transcript_tail_is_sent() {
        let provider = Arc::new(CannedProvider::new(
            r#"{"score": 3.0, "reasoning": "ok"}"#,
        ));
        let agent = EvasivenessAgent::new(Arc::clone(&provider) as Arc<dyn LLMProvider>, registry(), config());

        let transcript = format!("{}{}", "x".repeat(100), "THE QA TAIL SECTION.");
        agent.score(&transcript, "SBI", &quarter()).await.unwrap();

        let prompt = provider.last_prompt.lock().unwrap().clone();
        // Tail limit in config() is 20 chars
        assert!(prompt.contains("THE QA TAIL SECTION."));
        assert!(!prompt.contains("xxxxx"));
    }
}
