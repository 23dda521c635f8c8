//! Live progress events for pipeline runs
//!
//! The pipeline reports lifecycle progress through an abstract
//! [`ProgressSink`]; it never knows whether the consumer is a chunked HTTP
//! response, a WebSocket, or an in-process listener. Events are monotonic:
//! `start`, then any interleaving of extraction and evasiveness completions,
//! then per-topic delta completions, then `market_done`, then exactly one
//! terminal `done` or `error`. A `delta_done` for a topic is never emitted
//! before both of that topic's `topic_extraction_done` events.

use crate::model::DashboardPayload;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// Which quarter of the pair an extraction call covered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuarterSide {
    Prev,
    Curr,
}

/// One lifecycle event of a pipeline run
///
/// Serializes with an internal snake_case `type` tag and camelCase fields,
/// matching the payload wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ProgressEvent {
    /// The run started; declares the topic set being analyzed
    Start {
        company_ticker: String,
        quarter_previous: String,
        quarter: String,
        topics: Vec<String>,
    },

    /// One (topic, quarter) extraction call completed, including calls that
    /// resolved to an absent snapshot
    TopicExtractionDone { topic: String, which: QuarterSide },

    /// The evasiveness call completed (with its score or the neutral default)
    EvasivenessDone { score: f64 },

    /// The delta comparison for a topic completed
    DeltaDone { topic: String },

    /// Market correlation completed
    MarketDone { stock_change: f64 },

    /// Terminal: the run produced a payload; `id` is the cache entry id when
    /// the payload was persisted (or served from cache)
    Done {
        payload: DashboardPayload,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },

    /// Terminal: the run failed after starting; no payload was produced
    Error { detail: String },
}

impl ProgressEvent {
    /// Whether this event ends the stream
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProgressEvent::Done { .. } | ProgressEvent::Error { .. })
    }
}

/// Transport-agnostic consumer of progress events
///
/// Implemented for plain closures, so a callback can be passed directly:
///
/// ```
/// use callshift_pipeline::progress::{ProgressEvent, ProgressSink};
///
/// let sink = |event: ProgressEvent| eprintln!("{event:?}");
/// sink.emit(ProgressEvent::MarketDone { stock_change: -3.2 });
/// ```
pub trait ProgressSink: Send + Sync {
    /// Deliver one event; must not block the pipeline
    fn emit(&self, event: ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn emit(&self, event: ProgressEvent) {
        self(event);
    }
}

/// Sink that forwards events into a tokio unbounded channel
///
/// Send failures mean the consumer hung up; the event is dropped, which is
/// the correct behavior for a progress stream.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelSink {
    /// Create a sink over the given sender
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, event: ProgressEvent) {
        let _ = self.sender.send(event);
    }
}

/// Sink that discards all events
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: ProgressEvent) {}
}
