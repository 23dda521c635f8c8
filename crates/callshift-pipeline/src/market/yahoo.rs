//! Market data source over Yahoo Finance
//!
//! The correlator only needs daily closes for a date window. Fetches are
//! fronted by a timed cache keyed on (symbol, window) so repeated runs for
//! the same quarter do not refetch.

use crate::error::MarketError;
use async_trait::async_trait;
use cached::{Cached, TimedCache};
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use std::sync::Arc;
use std::time::Duration;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Supplies daily close prices for a symbol over a date window
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Closes in chronological order; may be empty when the exchange has no
    /// data for the window
    async fn close_prices(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>, MarketError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct WindowKey {
    symbol: String,
    start: i64,
    end: i64,
}

/// Yahoo Finance backed [`MarketData`] with a timed response cache
pub struct YahooMarketData {
    cache: Arc<RwLock<TimedCache<WindowKey, Vec<f64>>>>,
}

impl YahooMarketData {
    /// Create a source whose cached windows expire after `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Arc::new(RwLock::new(TimedCache::with_lifespan(ttl))),
        }
    }

    async fn fetch(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>, MarketError> {
        let fetch_error = |reason: String| MarketError::Fetch {
            symbol: symbol.to_string(),
            reason,
        };

        let provider = yahoo::YahooConnector::new().map_err(|e| fetch_error(e.to_string()))?;

        // yahoo_finance_api speaks time, the rest of the crate speaks chrono
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| fetch_error(format!("invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| fetch_error(format!("invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let quotes = response.quotes().map_err(|e| fetch_error(e.to_string()))?;

        Ok(quotes.iter().map(|q| q.close).collect())
    }
}

impl Clone for YahooMarketData {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn close_prices(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<f64>, MarketError> {
        let key = WindowKey {
            symbol: symbol.to_string(),
            start: start.timestamp(),
            end: end.timestamp(),
        };

        {
            let mut cache = self.cache.write().await;
            if let Some(closes) = cache.cache_get(&key) {
                debug!(symbol, "price window served from cache");
                return Ok(closes.clone());
            }
        }

        let closes = self.fetch(symbol, start, end).await?;
        debug!(symbol, closes = closes.len(), "price window fetched");

        let mut cache = self.cache.write().await;
        let _ = cache.cache_set(key, closes.clone());
        Ok(closes)
    }
}
