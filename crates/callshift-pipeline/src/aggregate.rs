//! Overall signal aggregation
//!
//! Collapses all per-topic metric scores into one headline number, a signal
//! label, and a short text summary for the dashboard.

use crate::model::{OverallSignal, TopicInsight};

/// Scores below this magnitude are treated as noise rather than a mixed signal
const NOISE_BAND: f64 = 0.5;

/// Aggregated headline for a payload
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    /// Mean metric score, clamped to [-10, 10], two decimals
    pub overall_score: f64,

    pub overall_signal: OverallSignal,

    /// 2-3 sentence summary built from topic takeaways
    pub summary: String,
}

/// Aggregate all insights into the overall score, signal, and summary
///
/// `threshold` is the Positive/Negative cutoff (exclusive): the mean must
/// strictly exceed it. With no metrics at all the score is 0.0 and the
/// signal is Noise.
pub fn aggregate_insights(
    insights: &[TopicInsight],
    ticker: &str,
    quarter_previous: &str,
    quarter: &str,
    threshold: f64,
) -> Aggregate {
    let scores: Vec<f64> = insights
        .iter()
        .flat_map(|i| i.metrics.iter().map(|m| m.signal_score))
        .collect();

    let overall_score = if scores.is_empty() {
        0.0
    } else {
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        (mean.clamp(-10.0, 10.0) * 100.0).round() / 100.0
    };

    let overall_signal = if overall_score > threshold {
        OverallSignal::Positive
    } else if overall_score < -threshold {
        OverallSignal::Negative
    } else if overall_score.abs() > NOISE_BAND {
        OverallSignal::Mixed
    } else {
        OverallSignal::Noise
    };

    Aggregate {
        overall_score,
        overall_signal,
        summary: summarize(insights, ticker, quarter_previous, quarter),
    }
}

/// First two takeaways from each of the first three topics, space-joined
fn summarize(
    insights: &[TopicInsight],
    ticker: &str,
    quarter_previous: &str,
    quarter: &str,
) -> String {
    let takeaways: Vec<&str> = insights
        .iter()
        .take(3)
        .flat_map(|i| i.key_takeaways.iter().take(2).map(String::as_str))
        .collect();

    if takeaways.is_empty() {
        return format!(
            "No significant changes detected between {quarter_previous} and {quarter} for {ticker}."
        );
    }

    takeaways.join(" ")
}
