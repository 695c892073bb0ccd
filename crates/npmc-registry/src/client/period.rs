//! Download statistics periods

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use npmc_core::error::NpmcError;

/// Period accepted by the downloads API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    LastDay,
    LastWeek,
    LastMonth,
    /// Inclusive date range, `start <= end`
    Range { start: NaiveDate, end: NaiveDate },
}

impl FromStr for Period {
    type Err = NpmcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NpmcError::InvalidPeriod {
            period: s.to_string(),
        };

        match s {
            "last-day" => Ok(Period::LastDay),
            "last-week" => Ok(Period::LastWeek),
            "last-month" => Ok(Period::LastMonth),
            _ => {
                let (start, end) = s.split_once(':').ok_or_else(invalid)?;
                let start = parse_day(start).ok_or_else(invalid)?;
                let end = parse_day(end).ok_or_else(invalid)?;
                if start > end {
                    return Err(invalid());
                }
                Ok(Period::Range { start, end })
            }
        }
    }
}

/// Strict `YYYY-MM-DD`
fn parse_day(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::LastDay => f.write_str("last-day"),
            Period::LastWeek => f.write_str("last-week"),
            Period::LastMonth => f.write_str("last-month"),
            Period::Range { start, end } => write!(f, "{}:{}", start, end),
        }
    }
}
