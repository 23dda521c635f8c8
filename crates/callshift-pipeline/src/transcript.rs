//! Transcript source abstraction
//!
//! The pipeline consumes transcripts through [`TranscriptSource`]; acquisition
//! (scraping, PDF extraction, quarter inference) happens upstream. The bundled
//! [`FileTranscriptSource`] reads pre-fetched transcripts from a directory of
//! `{TICKER}_{QUARTER}.txt` files.

use crate::error::TranscriptError;
use crate::quarter::TranscriptKey;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::path::PathBuf;

/// Supplies plain transcript text per (ticker, quarter)
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript text for a key
    async fn transcript_text(&self, key: &TranscriptKey) -> Result<String, TranscriptError>;
}

/// Directory-backed transcript source
///
/// Expects one `{TICKER}_{QUARTER}.txt` file per transcript, e.g.
/// `transcripts/BHARTI_Q3_2026.txt`.
#[derive(Debug, Clone)]
pub struct FileTranscriptSource {
    root: PathBuf,
}

impl FileTranscriptSource {
    /// Create a source reading from the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &TranscriptKey) -> PathBuf {
        self.root.join(format!("{key}.txt"))
    }
}

#[async_trait]
impl TranscriptSource for FileTranscriptSource {
    async fn transcript_text(
        &self,
        key: &TranscriptKey,
    ) -> Result<String, TranscriptError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(TranscriptError::NotFound {
                    key: key.to_string(),
                })
            }
            Err(e) => Err(TranscriptError::Io(e)),
        }
    }
}

/// Last `max_chars` characters of `text`, respecting char boundaries
///
/// The Q&A section sits at the end of a call, so evasiveness scoring only
/// needs the tail.
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }

    let skip = total - max_chars;
    text.char_indices()
        .nth(skip)
        .map(|(idx, _)| &text[idx..])
        .unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> TranscriptKey {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_file_source_reads_transcript() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(
            dir.path().join("BHARTI_Q3_2026.txt"),
            "Operator: welcome to the call.",
        )
        .await
        .unwrap();

        let source = FileTranscriptSource::new(dir.path());
        let text = source.transcript_text(&key("BHARTI_Q3_2026")).await.unwrap();
        assert_eq!(text, "Operator: welcome to the call.");
    }

    #[tokio::test]
    async fn test_file_source_missing_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileTranscriptSource::new(dir.path());

        let result = source.transcript_text(&key("SBI_Q1_2026")).await;
        match result {
            Err(TranscriptError::NotFound { key }) => assert_eq!(key, "SBI_Q1_2026"),
            other => panic!("Expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_tail_chars_shorter_than_limit() {
        assert_eq!(tail_chars("short", 100), "short");
        assert_eq!(tail_chars("", 10), "");
    }

    #[test]
    fn test_tail_chars_truncates_from_front() {
        assert_eq!(tail_chars("abcdefgh", 3), "fgh");
    }

    #[test]
    fn test_tail_chars_zero_limit() {
        assert_eq!(tail_chars("abc", 0), "");
    }

    #[test]
    fn test_tail_chars_multibyte_safe() {
        // Rupee signs are 3 bytes each; a byte-based cut would panic
        let text = "₹₹₹₹₹";
        assert_eq!(tail_chars(text, 2), "₹₹");
        assert_eq!(tail_chars(text, 2).chars().count(), 2);
    }

    #[test]
    fn test_tail_chars_exact_limit() {
        assert_eq!(tail_chars("abc", 3), "abc");
    }
}
