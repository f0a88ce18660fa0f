//! Choices offered by the filter controls, and the sidebar summary.

use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;

use crate::filter::core::{ClaimFilter, FraudStatusFilter, ProviderFilter};
use crate::filter::criteria::{FilterCriteria, FilteredClaims, FraudStatusLabel};
use crate::filter::date::DateRangeFilter;
use crate::loader::{ClaimsDataset, attending_date_bounds};
use crate::models::{ClaimRecord, ClaimType};

/// Values used to populate the filter controls
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Earliest attending date in the whole dataset
    pub min_date: Option<NaiveDate>,
    /// Latest attending date in the whole dataset
    pub max_date: Option<NaiveDate>,
    /// Sorted unique providers within the chosen date range
    pub providers: Vec<String>,
    pub fraud_statuses: [FraudStatusLabel; 3],
    /// Claim types left after the date, provider and fraud filters, in
    /// first-encountered order
    pub claim_types: Vec<ClaimType>,
}

impl FilterOptions {
    /// Control choices for the current criteria
    ///
    /// The provider list depends only on the date range; the claim type
    /// list depends on every criterion except the claim type selection.
    #[must_use]
    pub fn for_criteria(dataset: &ClaimsDataset, criteria: &FilterCriteria) -> Self {
        let (min_date, max_date) = dataset.date_bounds().unzip();

        let all: Vec<&ClaimRecord> = dataset.claims().iter().collect();
        let dated = match DateRangeFilter::from_range(&criteria.date_range) {
            Some(filter) => filter.filter(&all),
            None => all,
        };

        let providers = dated
            .iter()
            .map(|claim| claim.provider.as_str())
            .sorted_unstable()
            .dedup()
            .map(str::to_string)
            .collect();

        let narrowed = FraudStatusFilter(criteria.fraud_status.clone())
            .filter(&ProviderFilter(criteria.provider.clone()).filter(&dated));
        let claim_types = narrowed
            .iter()
            .map(|claim| &claim.claim_type)
            .unique()
            .cloned()
            .collect();

        Self {
            min_date,
            max_date,
            providers,
            fraud_statuses: FraudStatusLabel::ALL,
            claim_types,
        }
    }
}

/// Sidebar summary of the filtered subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DataSummary {
    pub total_records: usize,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl DataSummary {
    #[must_use]
    pub fn of(filtered: &FilteredClaims<'_>) -> Self {
        let (start_date, end_date) = attending_date_bounds(filtered.iter()).unzip();
        Self {
            total_records: filtered.len(),
            start_date,
            end_date,
        }
    }
}
