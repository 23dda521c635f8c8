//! Gemini response schemas for structured agent output
//!
//! Schemas use the OpenAPI-style type names (`OBJECT`, `STRING`, ...) that the
//! generateContent endpoint expects, with property names matching the wire
//! format of the model types in [`crate::model`].

use serde_json::{Value, json};

/// Schema for a thematic extraction result ([`crate::model::QuarterSnapshot`])
pub fn snapshot_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "keyTakeaways": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "rawQuotes": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["topic", "keyTakeaways", "rawQuotes"]
    })
}

/// Schema for a quarter comparison result ([`crate::model::TopicInsight`])
pub fn insight_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "topic": { "type": "STRING" },
            "keyTakeaways": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "metrics": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "subtopic": { "type": "STRING" },
                        "quoteOld": { "type": "STRING" },
                        "quoteNew": { "type": "STRING" },
                        "languageShift": { "type": "STRING" },
                        "signalClassification": {
                            "type": "STRING",
                            "enum": ["Positive", "Negative", "Noise"]
                        },
                        "signalScore": { "type": "NUMBER" },
                        "uiHint": {
                            "type": "STRING",
                            "enum": ["metric_card", "status_warning", "quote_expander"]
                        }
                    },
                    "required": [
                        "subtopic",
                        "quoteOld",
                        "quoteNew",
                        "languageShift",
                        "signalClassification",
                        "signalScore",
                        "uiHint"
                    ]
                }
            }
        },
        "required": ["topic", "keyTakeaways", "metrics"]
    })
}

/// Schema for the evasiveness score
pub fn evasiveness_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "reasoning": { "type": "STRING" }
        },
        "required": ["score", "reasoning"]
    })
}
