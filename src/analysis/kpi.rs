//! Headline metrics shown above the tabs.

use serde::Serialize;

use crate::analysis::{mean, percentage};
use crate::filter::FilteredClaims;

/// Key performance indicators of the filtered subset
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Kpis {
    pub total_claims: usize,
    /// Claims flagged as potential fraud
    pub fraud_claims: usize,
    /// `fraud_claims / total_claims * 100`, 0 for an empty subset
    pub fraud_percentage: f64,
    /// Mean reimbursed amount over claims that have one
    pub mean_reimbursed_amount: Option<f64>,
    /// Mean length of stay over claims that have one
    pub mean_length_of_stay: Option<f64>,
}

impl Kpis {
    #[must_use]
    pub fn compute(filtered: &FilteredClaims<'_>) -> Self {
        let total_claims = filtered.len();
        let fraud_claims = filtered.iter().filter(|claim| claim.is_fraud()).count();

        Self {
            total_claims,
            fraud_claims,
            fraud_percentage: percentage(fraud_claims, total_claims),
            mean_reimbursed_amount: mean(filtered.iter().filter_map(|c| c.reimbursed_amount)),
            mean_length_of_stay: mean(
                filtered
                    .iter()
                    .filter_map(|c| c.length_of_stay)
                    .map(f64::from),
            ),
        }
    }
}
