//! Local consistency validation
//!
//! Pure, deterministic sign check over every metric: a Positive signal with a
//! negative score (or the reverse) is a contradiction the delta agent must
//! not produce. Contradictions are flagged with a note, never auto-corrected;
//! Noise metrics are exempt from the rule.

use crate::model::{SignalClass, TopicInsight, ValidationStatus};
use tracing::warn;

/// Outcome of a validation pass over all insights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationSummary {
    /// Share of metrics that passed, 0-100, one decimal; 100.0 when there
    /// are no metrics
    pub validation_score: f64,

    /// Number of metrics whose status is not verified
    pub flagged_count: usize,
}

/// Check every metric's score sign against its classification
///
/// Mutates `validation_status`/`validation_note` in place and returns the
/// summary statistics for the payload.
pub fn validate_insights(insights: &mut [TopicInsight]) -> ValidationSummary {
    let mut total = 0usize;
    let mut flagged = 0usize;

    for insight in insights.iter_mut() {
        for metric in &mut insight.metrics {
            total += 1;

            let contradiction = match metric.signal_classification {
                SignalClass::Positive => metric.signal_score < 0.0,
                SignalClass::Negative => metric.signal_score > 0.0,
                SignalClass::Noise => false,
            };

            if contradiction {
                metric.validation_status = ValidationStatus::Flagged;
                metric.validation_note = format!(
                    "Signal is {:?} but score is {}",
                    metric.signal_classification, metric.signal_score
                );
                warn!(
                    topic = %insight.topic,
                    subtopic = %metric.subtopic,
                    "{}", metric.validation_note
                );
            }

            if metric.validation_status != ValidationStatus::Verified {
                flagged += 1;
            }
        }
    }

    let validation_score = if total == 0 {
        100.0
    } else {
        ((total - flagged) as f64 / total as f64 * 1000.0).round() / 10.0
    };

    ValidationSummary {
        validation_score,
        flagged_count: flagged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MarketValidation, MetricDelta, UiHint};

    fn metric(class: SignalClass, score: f64) -> MetricDelta {
        MetricDelta {
            subtopic: "Margin trajectory".to_string(),
            quote_old: "margins were stable".to_string(),
            quote_new: "margins compressed 80bps".to_string(),
            language_shift: "Stability language replaced by compression".to_string(),
            signal_classification: class,
            signal_score: score,
            ui_hint: UiHint::MetricCard,
            validation_status: ValidationStatus::default(),
            validation_note: String::new(),
            market_validation: MarketValidation::default(),
            market_note: String::new(),
        }
    }

    fn insight(metrics: Vec<MetricDelta>) -> TopicInsight {
        TopicInsight {
            topic: "Operational Margin".to_string(),
            key_takeaways: vec![],
            metrics,
        }
    }

    #[test]
    fn test_consistent_metrics_stay_verified() {
        let mut insights = vec![insight(vec![
            metric(SignalClass::Positive, 4.0),
            metric(SignalClass::Negative, -6.0),
            metric(SignalClass::Noise, 0.2),
        ])];

        let summary = validate_insights(&mut insights);

        assert!((summary.validation_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.flagged_count, 0);
        for m in &insights[0].metrics {
            assert_eq!(m.validation_status, ValidationStatus::Verified);
            assert!(m.validation_note.is_empty());
        }
    }

    #[test]
    fn test_positive_with_negative_score_is_flagged() {
        let mut insights = vec![insight(vec![metric(SignalClass::Positive, -3.5)])];

        let summary = validate_insights(&mut insights);

        assert_eq!(summary.flagged_count, 1);
        let m = &insights[0].metrics[0];
        assert_eq!(m.validation_status, ValidationStatus::Flagged);
        assert_eq!(m.validation_note, "Signal is Positive but score is -3.5");
    }

    #[test]
    fn test_negative_with_positive_score_is_flagged() {
        let mut insights = vec![insight(vec![metric(SignalClass::Negative, 2.0)])];

        let summary = validate_insights(&mut insights);

        assert_eq!(summary.flagged_count, 1);
        assert_eq!(
            insights[0].metrics[0].validation_status,
            ValidationStatus::Flagged
        );
    }

    #[test]
    fn test_noise_is_never_flagged_by_sign_rule() {
        let mut insights = vec![insight(vec![
            metric(SignalClass::Noise, -0.4),
            metric(SignalClass::Noise, 0.4),
            metric(SignalClass::Noise, 7.0),
        ])];

        let summary = validate_insights(&mut insights);
        assert_eq!(summary.flagged_count, 0);
    }

    #[test]
    fn test_zero_score_is_not_a_contradiction() {
        // The rule is strict inequality on the sign
        let mut insights = vec![insight(vec![
            metric(SignalClass::Positive, 0.0),
            metric(SignalClass::Negative, 0.0),
        ])];

        let summary = validate_insights(&mut insights);
        assert_eq!(summary.flagged_count, 0);
    }

    #[test]
    fn test_score_ten_metrics_two_flagged() {
        let mut metrics: Vec<MetricDelta> =
            (0..8).map(|_| metric(SignalClass::Positive, 3.0)).collect();
        metrics.push(metric(SignalClass::Positive, -1.0));
        metrics.push(metric(SignalClass::Negative, 1.0));

        let mut insights = vec![insight(metrics)];
        let summary = validate_insights(&mut insights);

        assert!((summary.validation_score - 80.0).abs() < f64::EPSILON);
        assert_eq!(summary.flagged_count, 2);
    }

    #[test]
    fn test_no_metrics_scores_hundred() {
        let mut insights = vec![insight(vec![])];
        let summary = validate_insights(&mut insights);
        assert!((summary.validation_score - 100.0).abs() < f64::EPSILON);
        assert_eq!(summary.flagged_count, 0);

        let summary = validate_insights(&mut []);
        assert!((summary.validation_score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_rounds_to_one_decimal() {
        // 2 of 3 verified = 66.666... -> 66.7
        let mut insights = vec![insight(vec![
            metric(SignalClass::Positive, 3.0),
            metric(SignalClass::Positive, 1.0),
            metric(SignalClass::Positive, -2.0),
        ])];

        let summary = validate_insights(&mut insights);
        assert!((summary.validation_score - 66.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_flags_span_multiple_topics() {
        let mut insights = vec![
            insight(vec![metric(SignalClass::Positive, -1.0)]),
            insight(vec![metric(SignalClass::Negative, -5.0)]),
        ];

        let summary = validate_insights(&mut insights);
        assert_eq!(summary.flagged_count, 1);
        assert!((summary.validation_score - 50.0).abs() < f64::EPSILON);
    }
}
