//! Thematic extraction agent

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::model::QuarterSnapshot;
use crate::prompts::snapshot_schema;
use crate::quarter::FiscalQuarter;
use crate::topic::Topic;
use callshift_llm::{GenerationRequest, LLMProvider, generate_structured};
use callshift_prompt::PromptRegistry;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Extracts a per-(topic, quarter) snapshot from a transcript
///
/// One instance serves all four topics; the topic picks the instruction set
/// from the prompt registry at call time.
pub struct ThematicAgent {
    provider: Arc<dyn LLMProvider>,
    prompts: Arc<PromptRegistry>,
    config: PipelineConfig,
}

impl ThematicAgent {
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

    /// Extract the topic's snapshot from one quarter's transcript
    ///
    /// Returns `None` when the call times out, fails, or produces
    /// unparseable output; the caller treats that as "no snapshot for this
    /// (topic, quarter)". Only a template failure is an error.
    #[instrument(skip(self, transcript), fields(topic = %topic, quarter = %quarter))]
    pub async fn extract(
        &self,
        transcript: &str,
        topic: Topic,
        ticker: &str,
        quarter: &FiscalQuarter,
    ) -> Result<Option<QuarterSnapshot>> {
        let system = self
            .prompts
            .render(&topic.system_prompt_key(), &json!({}))?;
        let prompt = self.prompts.render(
            "shift.user.extract",
            &json!({
                "topic": topic.label(),
                "company": ticker,
                "quarter": quarter.label(),
                "transcript": transcript,
            }),
        )?;

        let request = GenerationRequest::builder(&self.config.model)
            .system(system)
            .prompt(prompt)
            .temperature(self.config.temperature)
            .max_output_tokens(self.config.max_output_tokens)
            .response_schema(snapshot_schema())
            .build();

        let call = generate_structured::<QuarterSnapshot>(self.provider.as_ref(), request);
        match tokio::time::timeout(self.config.agent_timeout, call).await {
            Ok(Ok(mut snapshot)) => {
                // The model echoes a topic string back; the canonical label wins
                snapshot.topic = topic.label().to_string();
                debug!(
                    takeaways = snapshot.key_takeaways.len(),
                    quotes = snapshot.raw_quotes.len(),
                    "extraction complete"
                );
                Ok(Some(snapshot))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "extraction failed, treating snapshot as absent");
                Ok(None)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.agent_timeout.as_secs(),
                    "extraction timed out, treating snapshot as absent"
                );
                Ok(None)
            }
        }
    }
}
