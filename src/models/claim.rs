//! Claim entity model
//!
//! One row of the claims extract after date parsing, code remapping and
//! condition-list splitting.

use chrono::{Datelike, NaiveDate};
use smallvec::SmallVec;

use crate::models::types::{ClaimType, FraudFlag, Gender, Race};
use crate::utils::TimePeriod;

/// Chronic condition tokens of a single claim
pub type ConditionList = SmallVec<[String; 4]>;

/// Representation of a healthcare claim
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRecord {
    pub claim_id: String,
    /// Billing provider identifier
    pub provider: String,
    pub claim_type: ClaimType,
    /// Date the patient was attended; `None` when unparseable
    pub attending_date: Option<NaiveDate>,
    /// Date the claim ended; `None` when unparseable
    pub claim_end_date: Option<NaiveDate>,
    /// Insurance amount reimbursed
    pub reimbursed_amount: Option<f64>,
    /// Length of stay in days
    pub length_of_stay: Option<u32>,
    pub gender: Gender,
    pub race: Race,
    /// Trimmed condition tokens in source order
    pub chronic_conditions: ConditionList,
    /// Number of chronic conditions; taken from the source count column
    /// when the file has one, otherwise the length of the condition list
    pub chronic_condition_count: Option<u32>,
    pub fraud: FraudFlag,
    /// Claim year as recorded in the source
    pub claim_year: Option<i32>,
}

impl ClaimRecord {
    /// Create a claim with only the identifying fields set
    #[must_use]
    pub fn new(
        claim_id: impl Into<String>,
        provider: impl Into<String>,
        claim_type: ClaimType,
        fraud: FraudFlag,
    ) -> Self {
        Self {
            claim_id: claim_id.into(),
            provider: provider.into(),
            claim_type,
            attending_date: None,
            claim_end_date: None,
            reimbursed_amount: None,
            length_of_stay: None,
            gender: Gender::Unknown,
            race: Race::Unknown,
            chronic_conditions: ConditionList::new(),
            chronic_condition_count: None,
            fraud,
            claim_year: None,
        }
    }

    /// Set attending and end dates
    #[must_use]
    pub fn with_dates(mut self, attending: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.attending_date = attending;
        self.claim_end_date = end;
        self
    }

    /// Set the reimbursed amount
    #[must_use]
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.reimbursed_amount = Some(amount);
        self
    }

    /// Set the length of stay
    #[must_use]
    pub fn with_length_of_stay(mut self, days: u32) -> Self {
        self.length_of_stay = Some(days);
        self
    }

    /// Set the demographic codes
    #[must_use]
    pub fn with_demographics(mut self, gender: Gender, race: Race) -> Self {
        self.gender = gender;
        self.race = race;
        self
    }

    /// Set the condition list from its raw comma-delimited form
    ///
    /// The condition count is derived from the list.
    #[must_use]
    pub fn with_condition_list(mut self, raw: &str) -> Self {
        self.chronic_conditions = split_condition_list(raw);
        self.chronic_condition_count = u32::try_from(self.chronic_conditions.len()).ok();
        self
    }

    /// Inclusive day count between attending and end date
    ///
    /// `None` when either date is missing.
    #[must_use]
    pub fn claim_duration(&self) -> Option<i64> {
        match (self.attending_date, self.claim_end_date) {
            (Some(start), Some(end)) => Some((end - start).num_days() + 1),
            _ => None,
        }
    }

    /// Claim year, falling back to the attending date's year
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        self.claim_year
            .or_else(|| self.attending_date.map(|date| date.year()))
    }

    /// Calendar month of the attending date
    #[must_use]
    pub fn month(&self) -> Option<TimePeriod> {
        self.attending_date.map(TimePeriod::month_of)
    }

    /// Number of chronic conditions; `None` when the recorded count is missing
    #[must_use]
    pub fn condition_count(&self) -> Option<u32> {
        self.chronic_condition_count
    }

    #[must_use]
    pub fn is_fraud(&self) -> bool {
        self.fraud.is_fraud()
    }
}

/// Split a comma-delimited condition list into trimmed tokens
///
/// Order and duplicates are preserved.
#[must_use]
pub fn split_condition_list(raw: &str) -> ConditionList {
    raw.split(',').map(|token| token.trim().to_string()).collect()
}
