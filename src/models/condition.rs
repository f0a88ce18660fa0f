//! Condition occurrences: one row per chronic condition per claim.

use serde::Serialize;

use crate::models::claim::ClaimRecord;
use crate::models::types::FraudFlag;

/// A single chronic condition attached to a claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConditionOccurrence<'a> {
    pub condition: &'a str,
    /// Fraud flag of the owning claim
    pub fraud: FraudFlag,
    /// Provider of the owning claim
    pub provider: &'a str,
}

/// Explode claims into condition occurrences, in claim then list order
pub fn explode_conditions<'a, I>(claims: I) -> Vec<ConditionOccurrence<'a>>
where
    I: IntoIterator<Item = &'a ClaimRecord>,
{
    claims
        .into_iter()
        .flat_map(|claim| {
            claim
                .chronic_conditions
                .iter()
                .map(move |condition| ConditionOccurrence {
                    condition: condition.as_str(),
                    fraud: claim.fraud,
                    provider: claim.provider.as_str(),
                })
        })
        .collect()
}
