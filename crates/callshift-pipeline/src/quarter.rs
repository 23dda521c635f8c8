//! Fiscal quarter labels and transcript keys
//!
//! Quarter labels follow the Indian financial year, which ends in March.
//! `Q3_2026` is the third quarter of FY2026, reported in the Feb-Mar 2026
//! earnings season. Transcript keys combine an NSE ticker with a quarter
//! label, e.g. `BHARTI_Q3_2026`.

use crate::error::{PipelineError, Result};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;

const KEY_PATTERN: &str = r"^([A-Z0-9]+)_Q([1-4])_(\d{4})$";

/// A quarter of an Indian financial year
///
/// Ordering follows the reporting calendar: `Q3_2026 < Q4_2026 < Q1_2027`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FiscalQuarter {
    /// Fiscal year, ending March of this calendar year
    pub year: i32,
    /// Quarter number, 1-4
    pub number: u8,
}

impl FiscalQuarter {
    /// Create a quarter, validating the number is 1-4
    pub fn new(number: u8, year: i32) -> Result<Self> {
        if !(1..=4).contains(&number) {
            return Err(PipelineError::InvalidKey {
                key: format!("Q{number}_{year}"),
                reason: "quarter number must be 1-4".to_string(),
            });
        }
        Ok(Self { year, number })
    }

    /// The canonical label, e.g. `Q3_2026`
    pub fn label(&self) -> String {
        format!("Q{}_{}", self.number, self.year)
    }

    /// Calendar window in which this quarter's results are reported and
    /// traded on
    ///
    /// Inverse of the earnings-season heuristic: results for Q4 of FY `Y`
    /// land in Apr-Jul of calendar year `Y`, Q1 in Aug-Oct of `Y-1`, Q2 in
    /// Nov of `Y-1` through Jan of `Y`, and Q3 in Feb-Mar of `Y`.
    pub fn price_window(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        match self.number {
            1 => (
                utc_day_start(self.year - 1, 8, 1),
                utc_day_end(self.year - 1, 10, 31),
            ),
            2 => (
                utc_day_start(self.year - 1, 11, 1),
                utc_day_end(self.year, 1, 31),
            ),
            3 => (
                utc_day_start(self.year, 2, 1),
                utc_day_end(self.year, 3, 31),
            ),
            _ => (
                utc_day_start(self.year, 4, 1),
                utc_day_end(self.year, 7, 31),
            ),
        }
    }
}

impl std::str::FromStr for FiscalQuarter {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| PipelineError::InvalidKey {
            key: s.to_string(),
            reason: reason.to_string(),
        };

        let rest = s
            .strip_prefix('Q')
            .ok_or_else(|| invalid("expected Q{1-4}_{4-digit-year}"))?;
        let (number, year) = rest
            .split_once('_')
            .ok_or_else(|| invalid("expected Q{1-4}_{4-digit-year}"))?;

        let number: u8 = number
            .parse()
            .map_err(|_| invalid("quarter number is not a digit"))?;
        if year.len() != 4 {
            return Err(invalid("year must have 4 digits"));
        }
        let year: i32 = year.parse().map_err(|_| invalid("year is not numeric"))?;

        Self::new(number, year).map_err(|_| invalid("quarter number must be 1-4"))
    }
}

impl std::fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}_{}", self.number, self.year)
    }
}

/// Identifies one stored transcript: NSE ticker plus quarter label
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranscriptKey {
    /// Uppercase alphanumeric ticker, e.g. `BHARTI`
    pub ticker: String,
    /// The quarter the call reports on
    pub quarter: FiscalQuarter,
}

impl TranscriptKey {
    /// Create a key from parts
    pub fn new(ticker: impl Into<String>, quarter: FiscalQuarter) -> Self {
        Self {
            ticker: ticker.into(),
            quarter,
        }
    }
}

impl std::str::FromStr for TranscriptKey {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self> {
        let pattern = Regex::new(KEY_PATTERN)
            .map_err(|e| PipelineError::Internal(format!("key pattern failed to compile: {e}")))?;

        let caps = pattern.captures(s).ok_or_else(|| PipelineError::InvalidKey {
            key: s.to_string(),
            reason: "expected {TICKER}_Q{1-4}_{4-digit-year} with an uppercase alphanumeric ticker"
                .to_string(),
        })?;

        // The pattern guarantees all three groups are present and numeric
        let ticker = caps
            .get(1)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        let number: u8 = caps
            .get(2)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or_default();
        let year: i32 = caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or_default();

        Ok(Self {
            ticker,
            quarter: FiscalQuarter::new(number, year)?,
        })
    }
}

impl std::fmt::Display for TranscriptKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.ticker, self.quarter)
    }
}

fn utc_day_start(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}

fn utc_day_end(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(23, 59, 59))
        .map(|dt| Utc.from_utc_datetime(&dt))
        .unwrap_or_else(Utc::now)
}
