//! Pipeline orchestration
//!
//! One [`AnalysisPipeline::run`] call turns a pair of transcript keys into a
//! [`DashboardPayload`]: eight thematic extractions and one evasiveness call
//! fan out concurrently, per-topic delta comparisons join the two quarters,
//! then validation, market correlation, and aggregation run locally. Agent
//! failures degrade (absent topics, neutral evasiveness) rather than failing
//! the run; only bad input, transcript retrieval, and template errors do.

use crate::agents::{DeltaAgent, EvasivenessAgent, ThematicAgent};
use crate::aggregate::aggregate_insights;
use crate::cache::{CacheKey, MemoryResultStore, ResultStore};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::market::{MarketCorrelator, MarketData, YahooMarketData};
use crate::model::{DashboardPayload, QuarterSnapshot};
use crate::progress::{ProgressEvent, ProgressSink, QuarterSide};
use crate::prompts::register_prompts;
use crate::quarter::TranscriptKey;
use crate::topic::Topic;
use crate::transcript::TranscriptSource;
use crate::validate::validate_insights;
use callshift_llm::LLMProvider;
use callshift_prompt::PromptRegistry;
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Stock moves at or below this magnitude (percent) are too small to call a
/// direction for market validation
const MARKET_MOVE_THRESHOLD_PCT: f64 = 2.0;

/// The full earnings-call analysis pipeline
///
/// Construct via [`AnalysisPipeline::builder`]; the only required inputs are
/// an LLM provider and a transcript source.
pub struct AnalysisPipeline {
    thematic: ThematicAgent,
    evasiveness: EvasivenessAgent,
    delta: DeltaAgent,
    transcripts: Arc<dyn TranscriptSource>,
    correlator: MarketCorrelator,
    store: Arc<dyn ResultStore>,
    config: PipelineConfig,
}

impl std::fmt::Debug for AnalysisPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisPipeline")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AnalysisPipeline {
    /// Create a pipeline builder
    pub fn builder() -> AnalysisPipelineBuilder {
        AnalysisPipelineBuilder::default()
    }

    /// Analyze the language shift between two quarters of one company
    ///
    /// Keys look like `BHARTI_Q2_2026` / `BHARTI_Q3_2026`. Input errors are
    /// returned before any progress event is emitted; once `start` has gone
    /// out, a failing run always ends the stream with an `error` event. A
    /// cached result short-circuits to a single `done` event.
    #[instrument(skip(self, progress), fields(prev = prev_key, curr = curr_key))]
    pub async fn run(
        &self,
        prev_key: &str,
        curr_key: &str,
        progress: &dyn ProgressSink,
    ) -> Result<DashboardPayload> {
        let prev: TranscriptKey = prev_key.parse()?;
        let curr: TranscriptKey = curr_key.parse()?;

        if prev.ticker != curr.ticker {
            return Err(PipelineError::CompanyMismatch {
                prev: prev.ticker,
                curr: curr.ticker,
            });
        }
        if prev.quarter == curr.quarter {
            return Err(PipelineError::IdenticalQuarters(prev.quarter.label()));
        }

        let cache_key = CacheKey::new(
            &curr.ticker,
            prev.quarter.label(),
            curr.quarter.label(),
        );
        match self.store.get(&cache_key).await {
            Ok(Some(hit)) => {
                info!(key = %cache_key, id = %hit.id, "serving cached result");
                progress.emit(ProgressEvent::Done {
                    payload: hit.payload.clone(),
                    id: Some(hit.id),
                });
                return Ok(hit.payload);
            }
            Ok(None) => {}
            // A broken store degrades to a cache miss
            Err(e) => warn!(key = %cache_key, error = %e, "cache lookup failed"),
        }

        match self.run_fresh(&prev, &curr, &cache_key, progress).await {
            Ok(payload) => Ok(payload),
            Err(e) => {
                progress.emit(ProgressEvent::Error {
                    detail: e.to_string(),
                });
                Err(e)
            }
        }
    }

    async fn run_fresh(
        &self,
        prev: &TranscriptKey,
        curr: &TranscriptKey,
        cache_key: &CacheKey,
        progress: &dyn ProgressSink,
    ) -> Result<DashboardPayload> {
        let run_start = Instant::now();
        progress.emit(ProgressEvent::Start {
            company_ticker: curr.ticker.clone(),
            quarter_previous: prev.quarter.label(),
            quarter: curr.quarter.label(),
            topics: Topic::ALL.iter().map(|t| t.label().to_string()).collect(),
        });

        let fetch_start = Instant::now();
        let (prev_text, curr_text) = tokio::join!(
            self.transcripts.transcript_text(prev),
            self.transcripts.transcript_text(curr),
        );
        let (prev_text, curr_text) = (prev_text?, curr_text?);
        info!(
            elapsed_ms = fetch_start.elapsed().as_millis() as u64,
            prev_chars = prev_text.chars().count(),
            curr_chars = curr_text.chars().count(),
            "transcripts loaded"
        );

        // Phase 1: 4 topics x 2 quarters plus evasiveness, all concurrent
        let phase_start = Instant::now();
        let (prev_results, curr_results, evasiveness) = tokio::join!(
            self.extract_quarter(&prev_text, prev, QuarterSide::Prev, progress),
            self.extract_quarter(&curr_text, curr, QuarterSide::Curr, progress),
            async {
                let score = self
                    .evasiveness
                    .score(&curr_text, &curr.ticker, &curr.quarter)
                    .await;
                if let Ok(score) = &score {
                    progress.emit(ProgressEvent::EvasivenessDone { score: *score });
                }
                score
            },
        );
        let prev_snapshots = collect_snapshots(prev_results)?;
        let curr_snapshots = collect_snapshots(curr_results)?;
        let evasiveness = evasiveness?;
        info!(
            elapsed_ms = phase_start.elapsed().as_millis() as u64,
            prev_topics = prev_snapshots.len(),
            curr_topics = curr_snapshots.len(),
            evasiveness,
            "extraction phase complete"
        );

        // Phase 2: delta comparison for topics present in both quarters
        let phase_start = Instant::now();
        let delta_futures = Topic::ALL
            .iter()
            .filter_map(|&topic| {
                let prev_snap = prev_snapshots.get(&topic)?;
                let curr_snap = curr_snapshots.get(&topic)?;
                Some(async move {
                    let result = self
                        .delta
                        .compare(topic, prev_snap, curr_snap, &prev.quarter, &curr.quarter)
                        .await;
                    if result.is_ok() {
                        progress.emit(ProgressEvent::DeltaDone {
                            topic: topic.label().to_string(),
                        });
                    }
                    result
                })
            })
            .collect::<Vec<_>>();

        let mut insights = Vec::new();
        for result in join_all(delta_futures).await {
            if let Some(insight) = result? {
                insights.push(insight);
            }
        }
        info!(
            elapsed_ms = phase_start.elapsed().as_millis() as u64,
            insights = insights.len(),
            "delta phase complete"
        );

        // Phase 3: local validation, market correlation, aggregation
        let phase_start = Instant::now();
        let validation = validate_insights(&mut insights);
        let market = self
            .correlator
            .correlate(&curr.ticker, &curr.quarter, &mut insights)
            .await;
        progress.emit(ProgressEvent::MarketDone {
            stock_change: market.stock_price_change,
        });

        let aggregate = aggregate_insights(
            &insights,
            &curr.ticker,
            &prev.quarter.label(),
            &curr.quarter.label(),
            self.config.signal_threshold,
        );
        info!(
            elapsed_ms = phase_start.elapsed().as_millis() as u64,
            overall_score = aggregate.overall_score,
            flagged = validation.flagged_count,
            "validation phase complete"
        );

        let payload = DashboardPayload {
            company_ticker: curr.ticker.clone(),
            quarter: curr.quarter.label(),
            quarter_previous: prev.quarter.label(),
            executive_evasiveness_score: (evasiveness * 10.0).round() / 10.0,
            insights,
            overall_score: aggregate.overall_score,
            overall_signal: aggregate.overall_signal,
            summary: aggregate.summary,
            validation_score: validation.validation_score,
            flagged_count: validation.flagged_count,
            market_alignment_pct: market.market_alignment_pct,
            stock_price_change: market.stock_price_change,
            market_sources: market.sources,
        };

        let id = if payload.insights.is_empty() {
            None
        } else {
            match self.store.put(cache_key, &payload).await {
                Ok(id) => Some(id),
                // A failing write never fails a completed analysis
                Err(e) => {
                    warn!(key = %cache_key, error = %e, "cache write failed");
                    None
                }
            }
        };

        info!(
            elapsed_ms = run_start.elapsed().as_millis() as u64,
            overall_score = payload.overall_score,
            overall_signal = ?payload.overall_signal,
            metrics = payload
                .insights
                .iter()
                .map(|i| i.metrics.len())
                .sum::<usize>(),
            validation_score = payload.validation_score,
            alignment_pct = payload.market_alignment_pct,
            stock_change = payload.stock_price_change,
            evasiveness = payload.executive_evasiveness_score,
            "analysis complete"
        );

        progress.emit(ProgressEvent::Done {
            payload: payload.clone(),
            id,
        });
        Ok(payload)
    }

    /// Run all four topic extractions for one quarter concurrently
    async fn extract_quarter(
        &self,
        transcript: &str,
        key: &TranscriptKey,
        which: QuarterSide,
        progress: &dyn ProgressSink,
    ) -> Vec<(Topic, Result<Option<QuarterSnapshot>>)> {
        let futures = Topic::ALL.iter().map(|&topic| async move {
            let result = self
                .thematic
                .extract(transcript, topic, &key.ticker, &key.quarter)
                .await;
            if result.is_ok() {
                progress.emit(ProgressEvent::TopicExtractionDone {
                    topic: topic.label().to_string(),
                    which,
                });
            }
            (topic, result)
        });
        join_all(futures).await
    }
}

/// Index extraction results by topic, dropping absent and undiscussed topics
fn collect_snapshots(
    results: Vec<(Topic, Result<Option<QuarterSnapshot>>)>,
) -> Result<HashMap<Topic, QuarterSnapshot>> {
    let mut snapshots = HashMap::new();
    for (topic, result) in results {
        match result? {
            Some(snapshot) if !snapshot.is_empty() => {
                snapshots.insert(topic, snapshot);
            }
            Some(_) => debug!(topic = %topic, "topic not discussed, skipping"),
            None => {}
        }
    }
    Ok(snapshots)
}

/// Builder for [`AnalysisPipeline`]
///
/// Market data defaults to Yahoo Finance, the result store to an in-memory
/// store, and prompts to the built-in catalogue.
#[derive(Default)]
pub struct AnalysisPipelineBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    transcripts: Option<Arc<dyn TranscriptSource>>,
    market: Option<Arc<dyn MarketData>>,
    store: Option<Arc<dyn ResultStore>>,
    prompts: Option<Arc<PromptRegistry>>,
    config: Option<PipelineConfig>,
}

impl AnalysisPipelineBuilder {
    /// Set the LLM provider (required)
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the transcript source (required)
    pub fn transcripts(mut self, transcripts: Arc<dyn TranscriptSource>) -> Self {
        self.transcripts = Some(transcripts);
        self
    }

    /// Override the market-data source
    pub fn market(mut self, market: Arc<dyn MarketData>) -> Self {
        self.market = Some(market);
        self
    }

    /// Override the result store
    pub fn store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Override the prompt registry
    pub fn prompts(mut self, prompts: Arc<PromptRegistry>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    /// Override the configuration
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline
    ///
    /// # Errors
    ///
    /// Returns an error when provider or transcripts are missing, the
    /// configuration is invalid, or the built-in prompts fail to parse.
    pub fn build(self) -> Result<AnalysisPipeline> {
        let provider = self
            .provider
            .ok_or_else(|| PipelineError::Config("an LLM provider is required".to_string()))?;
        let transcripts = self
            .transcripts
            .ok_or_else(|| PipelineError::Config("a transcript source is required".to_string()))?;

        let config = self.config.unwrap_or_default();
        config.validate()?;

        let prompts = match self.prompts {
            Some(prompts) => prompts,
            None => {
                let registry = PromptRegistry::new();
                register_prompts(&registry)?;
                Arc::new(registry)
            }
        };

        let market = self
            .market
            .unwrap_or_else(|| Arc::new(YahooMarketData::new(config.market_cache_ttl)));
        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryResultStore::new()));

        Ok(AnalysisPipeline {
            thematic: ThematicAgent::new(
                Arc::clone(&provider),
                Arc::clone(&prompts),
                config.clone(),
            ),
            evasiveness: EvasivenessAgent::new(
                Arc::clone(&provider),
                Arc::clone(&prompts),
                config.clone(),
            ),
            delta: DeltaAgent::new(provider, prompts, config.clone()),
            transcripts,
            correlator: MarketCorrelator::new(market, MARKET_MOVE_THRESHOLD_PCT),
            store,
            config,
        })
    }
}
