//! Result cache for completed analysis runs
//!
//! A keyed replace store: one entry per (ticker, prev quarter, curr quarter),
//! written with delete-then-insert so repeated runs never accumulate
//! duplicates. The replace is not atomic across concurrent identical
//! requests; the last writer wins, which is accepted behavior. Zero-insight
//! payloads are never persisted and never served as hits.

use crate::error::CacheError;
use crate::model::DashboardPayload;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Identifies one analysis result: ticker plus the quarter pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub ticker: String,
    pub quarter_previous: String,
    pub quarter: String,
}

impl CacheKey {
    /// Create a key from parts
    pub fn new(
        ticker: impl Into<String>,
        quarter_previous: impl Into<String>,
        quarter: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            quarter_previous: quarter_previous.into(),
            quarter: quarter.into(),
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.ticker, self.quarter_previous, self.quarter
        )
    }
}

/// A stored payload with its entry id
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    /// Store-assigned entry id
    pub id: String,
    pub payload: DashboardPayload,
}

/// Keyed store for analysis payloads
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Look up the stored payload for a key, or miss
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedResult>, CacheError>;

    /// Replace the entry for a key, returning the new entry id
    ///
    /// Payloads with no insights are not stored; the previous entry, if any,
    /// is left untouched.
    async fn put(&self, key: &CacheKey, payload: &DashboardPayload)
        -> Result<String, CacheError>;
}

struct Entry {
    id: String,
    key: CacheKey,
    payload: DashboardPayload,
    created_at: DateTime<Utc>,
}

/// In-memory result store
///
/// Good enough for single-process deployments and tests; a database-backed
/// store implements the same trait with the same replace semantics.
#[derive(Clone, Default)]
pub struct MemoryResultStore {
    entries: Arc<RwLock<Vec<Entry>>>,
}

impl MemoryResultStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ResultStore for MemoryResultStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedResult>, CacheError> {
        let entries = self.entries.read().await;
        // Most recent write first; entries with no insights never count as hits
        let hit = entries
            .iter()
            .rev()
            .find(|e| e.key == *key && !e.payload.insights.is_empty())
            .map(|e| CachedResult {
                id: e.id.clone(),
                payload: e.payload.clone(),
            });

        debug!(key = %key, hit = hit.is_some(), "result cache lookup");
        Ok(hit)
    }

    async fn put(
        &self,
        key: &CacheKey,
        payload: &DashboardPayload,
    ) -> Result<String, CacheError> {
        let id = Uuid::new_v4().to_string();

        if payload.insights.is_empty() {
            debug!(key = %key, "skipping cache write for zero-insight payload");
            return Ok(id);
        }

        // Delete-then-insert under one write lock; concurrent writers to the
        // same key still race at the request level, last write wins
        let entry = Entry {
            id: id.clone(),
            key: key.clone(),
            payload: payload.clone(),
            created_at: Utc::now(),
        };
        debug!(key = %key, id = %id, created_at = %entry.created_at, "result cache write");

        let mut entries = self.entries.write().await;
        entries.retain(|e| e.key != *key);
        entries.push(entry);
        Ok(id)
    }
}

impl std::fmt::Debug for MemoryResultStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryResultStore").finish_non_exhaustive()
    }
}
