//! Market correlation
//!
//! Tags every non-Noise metric with whether the quarter's stock move agrees
//! with the metric's signal direction. Any market-data failure degrades to a
//! 0% change and unclear tags; it never fails the pipeline.

use crate::market::nse::nse_symbol;
use crate::market::yahoo::MarketData;
use crate::model::{MarketValidation, SignalClass, TopicInsight};
use crate::quarter::FiscalQuarter;
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of correlating a run's insights against market data
#[derive(Debug, Clone, PartialEq)]
pub struct MarketCorrelation {
    /// Percent close-price change over the quarter window, two decimals;
    /// 0.0 when no usable data
    pub stock_price_change: f64,

    /// Share of non-Noise metrics tagged aligned, 0-100, one decimal;
    /// 0.0 when there are no non-Noise metrics
    pub market_alignment_pct: f64,

    /// Data sources consulted; empty when the fetch failed
    pub sources: Vec<String>,
}

/// Correlates insights with the stock's quarterly price move
pub struct MarketCorrelator {
    data: Arc<dyn MarketData>,

    /// Moves at or below this magnitude (percent) are too small to call a
    /// direction, so every tag is unclear
    threshold_pct: f64,
}

impl MarketCorrelator {
    /// Create a correlator over a market-data source
    pub fn new(data: Arc<dyn MarketData>, threshold_pct: f64) -> Self {
        Self {
            data,
            threshold_pct,
        }
    }

    /// Fetch the quarter's price change and tag every non-Noise metric
    pub async fn correlate(
        &self,
        ticker: &str,
        quarter: &FiscalQuarter,
        insights: &mut [TopicInsight],
    ) -> MarketCorrelation {
        let symbol = nse_symbol(ticker);
        let (start, end) = quarter.price_window();

        let (stock_change, sources) =
            match self.data.close_prices(&symbol, start, end).await {
                Ok(closes) => {
                    let change = percent_change(&closes);
                    info!(
                        %symbol,
                        quarter = %quarter,
                        closes = closes.len(),
                        change,
                        "quarter price change"
                    );
                    (
                        change,
                        vec![format!("Yahoo Finance daily closes for {symbol}")],
                    )
                }
                Err(e) => {
                    warn!(%symbol, error = %e, "market fetch failed, treating change as 0%");
                    (0.0, Vec::new())
                }
            };

        let mut non_noise = 0usize;
        let mut aligned = 0usize;

        for insight in insights.iter_mut() {
            for metric in &mut insight.metrics {
                if metric.signal_classification == SignalClass::Noise {
                    continue;
                }
                non_noise += 1;

                let signal_sign = metric.signal_classification.sign();
                let (validation, agreement) = if stock_change.abs() <= self.threshold_pct {
                    (MarketValidation::Unclear, "too small to call a direction")
                } else if (stock_change > 0.0) == (signal_sign > 0) {
                    aligned += 1;
                    (MarketValidation::Aligned, "matches the signal direction")
                } else {
                    (MarketValidation::Divergent, "contradicts the signal direction")
                };

                metric.market_validation = validation;
                metric.market_note = format!(
                    "{symbol} moved {stock_change:+.1}% over the {quarter} window, {agreement}"
                );
            }
        }

        let market_alignment_pct = if non_noise == 0 {
            0.0
        } else {
            (aligned as f64 / non_noise as f64 * 1000.0).round() / 10.0
        };

        MarketCorrelation {
            stock_price_change: stock_change,
            market_alignment_pct,
            sources,
        }
    }
}

/// Percent change between the first and last close, two decimals
///
/// 0.0 for fewer than two closes or a zero first close.
pub fn percent_change(closes: &[f64]) -> f64 {
    let (Some(first), Some(last)) = (closes.first(), closes.last()) else {
        return 0.0;
    };
    if closes.len() < 2 || *first == 0.0 {
        return 0.0;
    }
    ((last - first) / first * 10000.0).round() / 100.0
}
