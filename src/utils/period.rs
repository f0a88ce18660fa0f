//! Calendar periods used as keys for the trend tables.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// A calendar year or year-month bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimePeriod {
    /// Yearly time period (e.g., 2020)
    Year(i32),
    /// Monthly time period (e.g., 2020-01)
    Month(i32, u32), // year, month
}

impl TimePeriod {
    /// Month bucket containing `date`
    #[must_use]
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month(date.year(), date.month())
    }

    /// Year bucket containing `date`
    #[must_use]
    pub fn year_of(date: NaiveDate) -> Self {
        Self::Year(date.year())
    }

    #[must_use]
    pub fn year(&self) -> i32 {
        match self {
            Self::Year(year) | Self::Month(year, _) => *year,
        }
    }
}

impl fmt::Display for TimePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Year(year) => write!(f, "{year}"),
            Self::Month(year, month) => write!(f, "{year}-{month:02}"),
        }
    }
}

impl Serialize for TimePeriod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
