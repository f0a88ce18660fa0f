//! Value-count distributions of categorical claim attributes.
//!
//! Counts are listed by count descending with ties in first-encountered
//! order. Claims with an unknown category are counted under `Unknown`, so
//! the counts of a distribution always sum to the subset size.

use serde::Serialize;

use crate::analysis::{count_by_first_seen, percentage};
use crate::filter::FilteredClaims;
use crate::models::{ClaimRecord, Gender};

/// Number of claims in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

fn value_counts<'a, F>(filtered: &FilteredClaims<'a>, key: F) -> Vec<CategoryCount>
where
    F: Fn(&'a ClaimRecord) -> &'a str,
{
    count_by_first_seen(filtered.iter().map(key))
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

/// Claims per fraud flag (`Yes`/`No`)
#[must_use]
pub fn fraud_status_counts(filtered: &FilteredClaims<'_>) -> Vec<CategoryCount> {
    value_counts(filtered, |claim| claim.fraud.label())
}

#[must_use]
pub fn claim_type_counts(filtered: &FilteredClaims<'_>) -> Vec<CategoryCount> {
    value_counts(filtered, |claim| claim.claim_type.label())
}

#[must_use]
pub fn gender_counts(filtered: &FilteredClaims<'_>) -> Vec<CategoryCount> {
    value_counts(filtered, |claim| claim.gender.label())
}

#[must_use]
pub fn race_counts(filtered: &FilteredClaims<'_>) -> Vec<CategoryCount> {
    value_counts(filtered, |claim| claim.race.label())
}

/// Percentage of male claimants among claims with a known gender
#[must_use]
pub fn male_share(filtered: &FilteredClaims<'_>) -> f64 {
    let (male, known) = filtered
        .iter()
        .fold((0, 0), |(male, known), claim| match claim.gender {
            Gender::Male => (male + 1, known + 1),
            Gender::Female => (male, known + 1),
            Gender::Unknown => (male, known),
        });
    percentage(male, known)
}
