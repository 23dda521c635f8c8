//! Data model for the analysis pipeline
//!
//! Snapshots and metric deltas live only for the duration of one run; the
//! [`DashboardPayload`] is the only entity that crosses the boundary to
//! callers and the result store. Wire format is camelCase JSON.

use serde::{Deserialize, Serialize};

/// Per-(topic, quarter) extraction result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterSnapshot {
    /// Topic label, e.g. "Revenue & Growth"
    pub topic: String,

    /// Ordered takeaways, most important first
    #[serde(default)]
    pub key_takeaways: Vec<String>,

    /// Verbatim quotes with speaker attribution
    #[serde(default)]
    pub raw_quotes: Vec<String>,
}

impl QuarterSnapshot {
    /// Whether the call discussed this topic at all
    pub fn is_empty(&self) -> bool {
        self.key_takeaways.is_empty() && self.raw_quotes.is_empty()
    }
}

/// Categorical judgment of a detected language shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalClass {
    Positive,
    Negative,
    Noise,
}

impl SignalClass {
    /// Direction sign: +1 for Positive, -1 for Negative, 0 for Noise
    pub fn sign(&self) -> i8 {
        match self {
            SignalClass::Positive => 1,
            SignalClass::Negative => -1,
            SignalClass::Noise => 0,
        }
    }
}

/// Rendering hint for a metric; carries no pipeline semantics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiHint {
    #[default]
    MetricCard,
    StatusWarning,
    QuoteExpander,
}

/// Outcome of the local consistency check on one metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    #[default]
    Verified,
    Flagged,
    Removed,
}

/// Agreement between a metric's direction and the stock move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketValidation {
    Aligned,
    Divergent,
    #[default]
    Unclear,
}

/// One scored language-shift metric, produced by the delta comparison
///
/// `validation_status`/`validation_note` are set by the local validator;
/// `market_validation`/`market_note` by the market correlator. Both default
/// to their neutral values so agent output deserializes without them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricDelta {
    /// The specific metric or theme that shifted
    pub subtopic: String,

    /// Verbatim quote from the previous quarter, or the sentinel
    /// "not discussed previously"
    pub quote_old: String,

    /// Verbatim quote from the current quarter, or the sentinel
    /// "no longer discussed"
    pub quote_new: String,

    /// One-line description of how the language changed
    pub language_shift: String,

    pub signal_classification: SignalClass,

    /// Signed magnitude in [-10, 10]
    pub signal_score: f64,

    #[serde(default)]
    pub ui_hint: UiHint,

    #[serde(default)]
    pub validation_status: ValidationStatus,

    #[serde(default)]
    pub validation_note: String,

    #[serde(default)]
    pub market_validation: MarketValidation,

    #[serde(default)]
    pub market_note: String,
}

/// All metric deltas for one topic, plus current-quarter takeaways
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicInsight {
    /// Topic label, e.g. "Revenue & Growth"
    pub topic: String,

    #[serde(default)]
    pub key_takeaways: Vec<String>,

    #[serde(default)]
    pub metrics: Vec<MetricDelta>,
}

/// Overall signal after aggregation across all topics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverallSignal {
    Positive,
    Negative,
    Mixed,
    Noise,
}

/// Root aggregate returned by a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardPayload {
    pub company_ticker: String,

    /// Current quarter label, e.g. "Q3_2026"
    pub quarter: String,

    /// Previous quarter label
    pub quarter_previous: String,

    /// 0-10, rounded to 1 decimal
    pub executive_evasiveness_score: f64,

    pub insights: Vec<TopicInsight>,

    /// Mean of all metric scores, clamped to [-10, 10], rounded to 2 decimals
    pub overall_score: f64,

    pub overall_signal: OverallSignal,

    pub summary: String,

    /// Share of metrics that passed the consistency check, 0-100
    pub validation_score: f64,

    pub flagged_count: usize,

    /// Share of non-noise metrics aligned with the stock move, 0-100
    pub market_alignment_pct: f64,

    /// Percent close-price change over the quarter's reporting window
    pub stock_price_change: f64,

    /// Data sources consulted for market validation
    pub market_sources: Vec<String>,
}
