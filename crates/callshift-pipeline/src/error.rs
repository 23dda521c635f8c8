//! Error types for the analysis pipeline
//!
//! Only two error classes cross the pipeline boundary: bad input (rejected
//! before any agent work starts) and unexpected orchestration failures.
//! Agent-level failures never appear here; they degrade to absent snapshots
//! or neutral defaults inside the run.

use thiserror::Error;

/// Pipeline-level errors
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A transcript key failed to parse
    #[error("Invalid transcript key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// The two transcript keys resolve to different companies
    #[error("Company mismatch: previous key is for {prev}, current key is for {curr}")]
    CompanyMismatch { prev: String, curr: String },

    /// The two transcript keys name the same quarter
    #[error("Quarters must be distinct, both keys are for {0}")]
    IdenticalQuarters(String),

    /// Transcript retrieval failed
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Prompt template error
    #[error("Prompt error: {0}")]
    Prompt(#[from] callshift_prompt::PromptError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unexpected failure during orchestration or payload assembly
    #[error("Pipeline failure: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Whether this error is a structural input error (raised before any
    /// agent work, so no progress events have been emitted)
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidKey { .. } | Self::CompanyMismatch { .. } | Self::IdenticalQuarters(_)
        )
    }
}

/// Errors from the transcript source
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// No transcript stored for the requested key
    #[error("No transcript found for {key}")]
    NotFound { key: String },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the market-data source
#[derive(Debug, Error)]
pub enum MarketError {
    /// Provider rejected or failed the request
    #[error("Market data error for {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    /// The window contained no usable quotes
    #[error("No price data for {symbol} in the requested window")]
    NoData { symbol: String },
}

/// Errors from the result store
#[derive(Debug, Error)]
pub enum CacheError {
    /// Write failed
    #[error("Cache write failed: {0}")]
    WriteFailed(String),

    /// Read failed
    #[error("Cache read failed: {0}")]
    ReadFailed(String),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipelineError::InvalidKey {
            key: "bhartiQ3".to_string(),
            reason: "missing quarter label".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid transcript key 'bhartiQ3': missing quarter label"
        );

        let err = PipelineError::CompanyMismatch {
            prev: "BHARTI".to_string(),
            curr: "SBI".to_string(),
        };
        assert!(err.to_string().contains("BHARTI"));
        assert!(err.to_string().contains("SBI"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(
            PipelineError::IdenticalQuarters("Q3_2026".to_string()).is_input_error()
        );
        assert!(
            PipelineError::CompanyMismatch {
                prev: "A".to_string(),
                curr: "B".to_string(),
            }
            .is_input_error()
        );
        assert!(!PipelineError::Internal("boom".to_string()).is_input_error());
        assert!(
            !PipelineError::Transcript(TranscriptError::NotFound {
                key: "SBI_Q1_2026".to_string(),
            })
            .is_input_error()
        );
    }

    #[test]
    fn test_transcript_error_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TranscriptError = io.into();
        assert!(err.to_string().contains("denied"));
    }
}
