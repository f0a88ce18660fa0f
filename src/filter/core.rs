//! Core filtering functionality for claims
//!
//! Defines the [`ClaimFilter`] trait, the [`Selection`] all-or-subset
//! choice used by every categorical filter, and the combinators that apply
//! filters in sequence.

use std::fmt::Debug;

use crate::models::{ClaimRecord, ClaimType, FraudFlag};

/// Trait for objects that can filter claims
pub trait ClaimFilter: Debug {
    /// Whether `claim` is kept
    fn matches(&self, claim: &ClaimRecord) -> bool;

    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Narrow `claims` to the matching subset, preserving order
    fn filter<'a>(&self, claims: &[&'a ClaimRecord]) -> Vec<&'a ClaimRecord> {
        claims
            .iter()
            .copied()
            .filter(|claim| self.matches(claim))
            .collect()
    }
}

/// Either every value, or an explicit set of values
///
/// `All` is the no-op case of a filter; `Subset` keeps only listed values
/// (an empty subset keeps nothing).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Subset(Vec<T>),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq> Selection<T> {
    /// Selection of a single value
    #[must_use]
    pub fn only(value: T) -> Self {
        Self::Subset(vec![value])
    }

    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Subset(values) => values.contains(value),
        }
    }

    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// A filter that always includes all claims
#[derive(Debug, Clone, Default)]
pub struct IncludeAllFilter;

impl ClaimFilter for IncludeAllFilter {
    fn matches(&self, _claim: &ClaimRecord) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "include-all"
    }
}

/// Keeps claims billed by the selected provider(s)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter(pub Selection<String>);

impl ClaimFilter for ProviderFilter {
    fn matches(&self, claim: &ClaimRecord) -> bool {
        self.0.contains(&claim.provider)
    }

    fn name(&self) -> &'static str {
        "provider"
    }
}

/// Keeps claims whose fraud flag is selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FraudStatusFilter(pub Selection<FraudFlag>);

impl ClaimFilter for FraudStatusFilter {
    fn matches(&self, claim: &ClaimRecord) -> bool {
        self.0.contains(&claim.fraud)
    }

    fn name(&self) -> &'static str {
        "fraud-status"
    }
}

/// Keeps claims whose claim type is selected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimTypeFilter(pub Selection<ClaimType>);

impl ClaimFilter for ClaimTypeFilter {
    fn matches(&self, claim: &ClaimRecord) -> bool {
        self.0.contains(&claim.claim_type)
    }

    fn name(&self) -> &'static str {
        "claim-type"
    }
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug, Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn ClaimFilter + Send + Sync>>,
}

impl AndFilter {
    /// Create a new AND filter
    #[must_use]
    pub fn new(filters: Vec<Box<dyn ClaimFilter + Send + Sync>>) -> Self {
        Self { filters }
    }

    /// Append a filter, applied after the existing ones
    #[must_use]
    pub fn with(mut self, filter: impl ClaimFilter + Send + Sync + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// The combined filters, in application order
    #[must_use]
    pub fn filters(&self) -> &[Box<dyn ClaimFilter + Send + Sync>] {
        &self.filters
    }
}

impl ClaimFilter for AndFilter {
    fn matches(&self, claim: &ClaimRecord) -> bool {
        self.filters.iter().all(|filter| filter.matches(claim))
    }

    fn name(&self) -> &'static str {
        "and"
    }

    fn filter<'a>(&self, claims: &[&'a ClaimRecord]) -> Vec<&'a ClaimRecord> {
        let mut result = claims.to_vec();
        for filter in &self.filters {
            if result.is_empty() {
                break;
            }
            let before = result.len();
            result = filter.filter(&result);
            log::debug!("{} filter: {} -> {} claims", filter.name(), before, result.len());
        }
        result
    }
}
