//! Market data and correlation
//!
//! - `nse`: transcript ticker -> Yahoo Finance NSE symbol registry
//! - `yahoo`: the [`MarketData`] trait and its Yahoo Finance implementation
//! - `correlate`: tags metrics with agreement against the quarter's stock move

pub mod correlate;
pub mod nse;
pub mod yahoo;

pub use correlate::{MarketCorrelation, MarketCorrelator, percent_change};
pub use nse::nse_symbol;
pub use yahoo::{MarketData, YahooMarketData};
