//! Date filtering functionality for claims
//!
//! Filters on the attending date over an inclusive range.

use chrono::NaiveDate;

use crate::filter::core::ClaimFilter;
use crate::models::ClaimRecord;

/// A date range as chosen in the date picker
///
/// Either endpoint may be missing while the user is still picking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// A complete range
    #[must_use]
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Both endpoints, if the range is complete
    #[must_use]
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

/// A filter that includes only claims attended within a date range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeFilter {
    /// The start date (inclusive)
    start_date: NaiveDate,
    /// The end date (inclusive)
    end_date: NaiveDate,
}

impl DateRangeFilter {
    #[must_use]
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Filter for a picker range; `None` when the range is incomplete
    #[must_use]
    pub fn from_range(range: &DateRange) -> Option<Self> {
        range.bounds().map(|(start, end)| Self::new(start, end))
    }
}

impl ClaimFilter for DateRangeFilter {
    /// Claims without an attending date never match
    fn matches(&self, claim: &ClaimRecord) -> bool {
        claim
            .attending_date
            .is_some_and(|date| self.start_date <= date && date <= self.end_date)
    }

    fn name(&self) -> &'static str {
        "date-range"
    }
}
