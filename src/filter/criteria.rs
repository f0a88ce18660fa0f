//! User-chosen filter criteria and the filtered working subset.

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use log::{debug, info};
use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::filter::core::{
    AndFilter, ClaimFilter, ClaimTypeFilter, FraudStatusFilter, ProviderFilter, Selection,
};
use crate::filter::date::{DateRange, DateRangeFilter};
use crate::loader::ClaimsDataset;
use crate::models::{ClaimRecord, ClaimType, ConditionOccurrence, FraudFlag, explode_conditions};

/// Provider dropdown entry that disables the provider filter
pub const ALL_PROVIDERS: &str = "All Providers";

/// Labels offered by the fraud-status multi-select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FraudStatusLabel {
    #[serde(rename = "All Claims")]
    AllClaims,
    #[serde(rename = "Potential Fraud")]
    PotentialFraud,
    #[serde(rename = "No Fraud")]
    NoFraud,
}

impl FraudStatusLabel {
    /// Every label, in dropdown order
    pub const ALL: [Self; 3] = [Self::AllClaims, Self::PotentialFraud, Self::NoFraud];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::AllClaims => "All Claims",
            Self::PotentialFraud => "Potential Fraud",
            Self::NoFraud => "No Fraud",
        }
    }

    /// Resolve a multi-select state into a fraud flag selection
    ///
    /// Any occurrence of `AllClaims` wins over the other labels.
    #[must_use]
    pub fn to_selection(labels: &[Self]) -> Selection<FraudFlag> {
        if labels.contains(&Self::AllClaims) {
            return Selection::All;
        }
        let mut flags = Vec::with_capacity(2);
        for label in labels {
            let flag = match label {
                Self::PotentialFraud => FraudFlag::Yes,
                Self::NoFraud => FraudFlag::No,
                Self::AllClaims => continue,
            };
            if !flags.contains(&flag) {
                flags.push(flag);
            }
        }
        Selection::Subset(flags)
    }
}

impl fmt::Display for FraudStatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FraudStatusLabel {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|label| label.label() == s.trim())
            .ok_or_else(|| DashboardError::Config(format!("Unknown fraud status label: {s}")))
    }
}

/// Provider selection for a dropdown value
#[must_use]
pub fn provider_selection(choice: &str) -> Selection<String> {
    if choice == ALL_PROVIDERS {
        Selection::All
    } else {
        Selection::only(choice.to_string())
    }
}

/// Claim type selection for a multi-select state
///
/// An empty selection disables the filter rather than excluding every row.
#[must_use]
pub fn claim_type_selection(selected: Vec<ClaimType>) -> Selection<ClaimType> {
    if selected.is_empty() {
        Selection::All
    } else {
        Selection::Subset(selected)
    }
}

/// Complete set of filter choices for one recomputation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub date_range: DateRange,
    pub provider: Selection<String>,
    pub fraud_status: Selection<FraudFlag>,
    pub claim_types: Selection<ClaimType>,
}

impl Default for FilterCriteria {
    /// Initial dashboard state: both fraud labels ticked, everything else open
    fn default() -> Self {
        Self {
            date_range: DateRange::default(),
            provider: Selection::All,
            fraud_status: FraudStatusLabel::to_selection(&[
                FraudStatusLabel::PotentialFraud,
                FraudStatusLabel::NoFraud,
            ]),
            claim_types: Selection::All,
        }
    }
}

impl FilterCriteria {
    #[must_use]
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = range;
        self
    }

    /// Set the provider from a dropdown value
    #[must_use]
    pub fn with_provider(mut self, choice: &str) -> Self {
        self.provider = provider_selection(choice);
        self
    }

    #[must_use]
    pub fn with_fraud_labels(mut self, labels: &[FraudStatusLabel]) -> Self {
        self.fraud_status = FraudStatusLabel::to_selection(labels);
        self
    }

    #[must_use]
    pub fn with_claim_types(mut self, selected: Vec<ClaimType>) -> Self {
        self.claim_types = claim_type_selection(selected);
        self
    }

    /// The filter chain, in application order
    ///
    /// An incomplete date range contributes no filter.
    #[must_use]
    pub fn to_filter(&self) -> AndFilter {
        let mut filter = AndFilter::default();
        if let Some(dates) = DateRangeFilter::from_range(&self.date_range) {
            filter = filter.with(dates);
        }
        filter
            .with(ProviderFilter(self.provider.clone()))
            .with(FraudStatusFilter(self.fraud_status.clone()))
            .with(ClaimTypeFilter(self.claim_types.clone()))
    }

    /// Narrow the dataset to the claims matching every criterion
    pub fn apply<'a>(&self, dataset: &'a ClaimsDataset) -> FilteredClaims<'a> {
        let start = Instant::now();
        let all: Vec<&ClaimRecord> = dataset.claims().iter().collect();
        let claims = self.to_filter().filter(&all);

        debug!(
            "Filtered {} of {} claims in {:?}",
            claims.len(),
            all.len(),
            start.elapsed()
        );
        if claims.is_empty() && !all.is_empty() {
            info!("No claims match the current filter criteria");
        }

        FilteredClaims { claims }
    }
}

/// The working subset every chart and statistic is computed from
///
/// Borrows from the dataset; the dataset itself is never modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredClaims<'a> {
    claims: Vec<&'a ClaimRecord>,
}

impl<'a> FilteredClaims<'a> {
    /// Every claim in the dataset, unfiltered
    #[must_use]
    pub fn all(dataset: &'a ClaimsDataset) -> Self {
        Self {
            claims: dataset.claims().iter().collect(),
        }
    }

    /// Wrap an already-filtered set of claims
    #[must_use]
    pub fn from_claims(claims: Vec<&'a ClaimRecord>) -> Self {
        Self { claims }
    }

    /// Row count, the denominator of every percentage
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a ClaimRecord> + '_ {
        self.claims.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[&'a ClaimRecord] {
        &self.claims
    }

    /// One row per chronic condition per claim of the subset
    #[must_use]
    pub fn conditions(&self) -> Vec<ConditionOccurrence<'a>> {
        explode_conditions(self.claims.iter().copied())
    }
}
