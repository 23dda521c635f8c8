//! Multi-agent earnings-call analysis
//!
//! Compares two quarters of one company's earnings-call transcripts and
//! produces a dashboard payload describing how management's language shifted:
//! per-topic metric deltas with signal scores, an evasiveness rating for the
//! current call, local sign validation, correlation against the stock's move
//! over the quarter window, and an aggregated overall signal.
//!
//! # Example
//!
//! ```no_run
//! use callshift_llm::GeminiProvider;
//! use callshift_pipeline::{AnalysisPipeline, FileTranscriptSource, NullSink};
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = AnalysisPipeline::builder()
//!     .provider(Arc::new(GeminiProvider::from_env()?))
//!     .transcripts(Arc::new(FileTranscriptSource::new("transcripts")))
//!     .build()?;
//!
//! let payload = pipeline
//!     .run("BHARTI_Q2_2026", "BHARTI_Q3_2026", &NullSink)
//!     .await?;
//! println!("{}: {:?}", payload.company_ticker, payload.overall_signal);
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod aggregate;
pub mod cache;
pub mod config;
pub mod error;
pub mod market;
pub mod model;
pub mod pipeline;
pub mod progress;
pub mod prompts;
pub mod quarter;
pub mod topic;
pub mod transcript;
pub mod validate;

pub use cache::{CacheKey, CachedResult, MemoryResultStore, ResultStore};
pub use config::{PipelineConfig, PipelineConfigBuilder};
pub use error::{CacheError, MarketError, PipelineError, Result, TranscriptError};
pub use model::{
    DashboardPayload, MarketValidation, MetricDelta, OverallSignal, QuarterSnapshot, SignalClass,
    TopicInsight, UiHint, ValidationStatus,
};
pub use pipeline::{AnalysisPipeline, AnalysisPipelineBuilder};
pub use progress::{ChannelSink, NullSink, ProgressEvent, ProgressSink, QuarterSide};
pub use quarter::{FiscalQuarter, TranscriptKey};
pub use topic::Topic;
pub use transcript::{FileTranscriptSource, TranscriptSource};
