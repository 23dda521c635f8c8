//! Temporal delta comparison agent

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::model::{QuarterSnapshot, TopicInsight};
use crate::prompts::insight_schema;
use crate::quarter::FiscalQuarter;
use crate::topic::Topic;
use callshift_llm::{GenerationRequest, LLMProvider, generate_structured};
use callshift_prompt::PromptRegistry;
use serde_json::json;
use std::sync::Arc;
use tracing::{instrument, warn};

/// Compares one topic's snapshots across two quarters and scores the shifts
pub struct DeltaAgent {
    provider: Arc<dyn LLMProvider>,
    prompts: Arc<PromptRegistry>,
    config: PipelineConfig,
}

impl DeltaAgent {
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

    /// Compare two quarter snapshots for one topic
    ///
    /// `Ok(None)` on timeout or a failed call; that topic is simply absent
    /// from the payload. Scores outside [-10, 10] are clamped on ingestion.
    #[instrument(
        skip(self, prev, curr),
        fields(topic = %topic, quarter = %quarter)
    )]
    pub async fn compare(
        &self,
        topic: Topic,
        prev: &QuarterSnapshot,
        curr: &QuarterSnapshot,
        quarter_previous: &FiscalQuarter,
        quarter: &FiscalQuarter,
    ) -> Result<Option<TopicInsight>> {
        let system = self
            .prompts
            .render("shift.system.temporal_delta", &json!({}))?;
        let prompt = self.prompts.render(
            "shift.user.compare",
            &json!({
                "topic": topic.label(),
                "quarter_previous": quarter_previous.label(),
                "quarter_current": quarter.label(),
                "takeaways_previous": bullet_block(&prev.key_takeaways, "No takeaways extracted"),
                "quotes_previous": quote_block(
                    &prev.raw_quotes,
                    self.config.quote_sample_size,
                    "No quotes extracted",
                ),
                "takeaways_current": bullet_block(&curr.key_takeaways, "No takeaways extracted"),
                "quotes_current": quote_block(
                    &curr.raw_quotes,
                    self.config.quote_sample_size,
                    "No quotes extracted",
                ),
            }),
        )?;

        let request = GenerationRequest::builder(&self.config.model)
            .system(system)
            .prompt(prompt)
            .temperature(self.config.temperature)
            .max_output_tokens(self.config.max_output_tokens)
            .response_schema(insight_schema())
            .build();

        let call = generate_structured::<TopicInsight>(self.provider.as_ref(), request);
        match tokio::time::timeout(self.config.agent_timeout, call).await {
            Ok(Ok(mut insight)) => {
                insight.topic = topic.label().to_string();
                for metric in &mut insight.metrics {
                    metric.signal_score = metric.signal_score.clamp(-10.0, 10.0);
                }
                Ok(Some(insight))
            }
            Ok(Err(e)) => {
                warn!(error = %e, "delta comparison failed, dropping topic");
                Ok(None)
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.config.agent_timeout.as_secs(),
                    "delta comparison timed out, dropping topic"
                );
                Ok(None)
            }
        }
    }
}

fn bullet_block(lines: &[String], fallback: &str) -> String {
    if lines.is_empty() {
        return fallback.to_string();
    }
    lines
        .iter()
        .map(|line| format!("- {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quote_block(quotes: &[String], limit: usize, fallback: &str) -> String {
    if quotes.is_empty() {
        return fallback.to_string();
    }
    quotes
        .iter()
        .take(limit)
        .map(|quote| format!("\"{quote}\""))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SignalClass;
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
            .quote_sample_size(2)
            .build()
            .unwrap()
    }

    fn quarters() -> (FiscalQuarter, FiscalQuarter) {
        ("Q2_2026".parse().unwrap(), "Q3_2026".parse().unwrap())
    }

    fn snapshot(takeaways: &[&str], quotes: &[&str]) -> QuarterSnapshot {
        QuarterSnapshot {
            topic: "Revenue & Growth".to_string(),
            key_takeaways: takeaways.iter().map(|s| s.to_string()).collect(),
            raw_quotes: quotes.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn insight_json() -> &'static str {
        r#"{
            "topic": "wrong label",
            "keyTakeaways": ["ARPU guidance raised"],
            "metrics": [{
                "subtopic": "ARPU",
                "quoteOld": "ARPU was flat",
                "quoteNew": "ARPU grew 8%",
                "languageShift": "from flat to growing",
                "signalClassification": "Positive",
                "signalScore": 14.0
            }]
        }"#
    }

    #[tokio::test]
    async fn test_compare_overwrites_topic_and_clamps_score() {
        let (prev_q, curr_q) = quarters();
        let agent = DeltaAgent::new(
            Arc::new(CannedProvider::new(insight_json())),
            registry(),
            config(),
        );

        let insight = agent
            .compare(
                Topic::RevenueGrowth,
                &snapshot(&["flat ARPU"], &["ARPU was flat"]),
                &snapshot(&["ARPU up"], &["ARPU grew 8%"]),
                &prev_q,
                &curr_q,
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(insight.topic, "Revenue & Growth");
        assert_eq!(insight.metrics.len(), 1);
        assert!((insight.metrics[0].signal_score - 10.0).abs() < f64::EPSILON);
        assert_eq!(
            insight.metrics[0].signal_classification,
            SignalClass::Positive
        );
    }

    #[tokio::test]
    async fn test_compare_prompt_contains_bullets_and_limited_quotes() {
        let (prev_q, curr_q) = quarters();
        let provider = Arc::new(CannedProvider::new(insight_json()));
        let agent = DeltaAgent::new(Arc::clone(&provider) as Arc<dyn LLMProvider>, registry(), config());

        agent
            .compare(
                Topic::RevenueGrowth,
                &snapshot(&["a", "b"], &["q1", "q2", "q3"]),
                &snapshot(&[], &[]),
                &prev_q,
                &curr_q,
            )
            .await
            .unwrap();

        let prompt = provider.last_prompt.lock().unwrap().clone();
        assert!(prompt.contains("- a\n- b"));
        // quote_sample_size in config() is 2
        assert!(prompt.contains("\"q1\"\n\"q2\""));
        assert!(!prompt.contains("q3"));
        assert!(prompt.contains("No takeaways extracted"));
        assert!(prompt.contains("No quotes extracted"));
    }

    #[tokio::test]
    async fn test_failed_call_drops_topic() {
        let (prev_q, curr_q) = quarters();
        let agent = DeltaAgent::new(
            Arc::new(CannedProvider::new("not json")),
            registry(),
            config(),
        );

        let insight = agent
            .compare(
                Topic::MacroRisk,
                &snapshot(&["x"], &["y"]),
                &snapshot(&["x"], &["y"]),
                &prev_q,
                &curr_q,
            )
            .await
            .unwrap();

        assert!(insight.is_none());
    }

    #[tokio::test]
    async fn test_timeout_drops_topic() {
        let (prev_q, curr_q) = quarters();
        let agent = DeltaAgent::new(Arc::new(HangingProvider), registry(), config());

        let insight = agent
            .compare(
                Topic::CapitalLiquidity,
                &snapshot(&["x"], &["y"]),
                &snapshot(&["x"], &["y"]),
                &prev_q,
                &curr_q,
            )
            .await
            .unwrap();

        assert!(insight.is_none());
    }
}
