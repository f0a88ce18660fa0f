//! Claim amount statistics for the financial tab.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{descending_missing_last, mean, quantile};
use crate::filter::FilteredClaims;
use crate::models::FraudFlag;

/// Five-number summary of claim amounts for one (claim type, fraud) group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmountSummary {
    pub claim_type: String,
    pub fraud: FraudFlag,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl AmountSummary {
    fn from_sorted(claim_type: String, fraud: FraudFlag, sorted: &[f64]) -> Option<Self> {
        Some(Self {
            claim_type,
            fraud,
            count: sorted.len(),
            min: *sorted.first()?,
            q1: quantile(sorted, 0.25)?,
            median: quantile(sorted, 0.5)?,
            q3: quantile(sorted, 0.75)?,
            max: *sorted.last()?,
        })
    }
}

/// Box-plot summaries of reimbursed amounts by claim type and fraud flag
///
/// Groups are ordered by claim type label, then `No` before `Yes`. Claims
/// without an amount are ignored; groups with no amounts are omitted.
#[must_use]
pub fn amount_summaries(filtered: &FilteredClaims<'_>) -> Vec<AmountSummary> {
    let mut groups: BTreeMap<(&str, FraudFlag), Vec<f64>> = BTreeMap::new();
    for claim in filtered.iter() {
        if let Some(amount) = claim.reimbursed_amount {
            groups
                .entry((claim.claim_type.label(), claim.fraud))
                .or_default()
                .push(amount);
        }
    }

    groups
        .into_iter()
        .filter_map(|((claim_type, fraud), mut amounts)| {
            amounts.sort_by(f64::total_cmp);
            AmountSummary::from_sorted(claim_type.to_string(), fraud, &amounts)
        })
        .collect()
}

/// Mean reimbursed amount of one provider's claims with one fraud flag
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderMeanAmount {
    pub provider: String,
    pub fraud: FraudFlag,
    /// `None` when none of the group's claims carry an amount
    pub mean_amount: Option<f64>,
}

/// Top `limit` (provider, fraud) groups by mean reimbursed amount
///
/// Equal means keep (provider, fraud) order.
#[must_use]
pub fn provider_mean_amounts(filtered: &FilteredClaims<'_>, limit: usize) -> Vec<ProviderMeanAmount> {
    let mut groups: BTreeMap<(&str, FraudFlag), Vec<f64>> = BTreeMap::new();
    for claim in filtered.iter() {
        let amounts = groups
            .entry((claim.provider.as_str(), claim.fraud))
            .or_default();
        amounts.extend(claim.reimbursed_amount);
    }

    let mut rows: Vec<ProviderMeanAmount> = groups
        .into_iter()
        .map(|((provider, fraud), amounts)| ProviderMeanAmount {
            provider: provider.to_string(),
            fraud,
            mean_amount: mean(amounts),
        })
        .collect();
    rows.sort_by(|a, b| descending_missing_last(a.mean_amount, b.mean_amount));
    rows.truncate(limit);
    rows
}

/// Mean claim amount of fraud versus non-fraud claims
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmountComparison {
    pub fraud_mean: Option<f64>,
    pub non_fraud_mean: Option<f64>,
    /// Signed difference of the fraud mean relative to the non-fraud mean,
    /// in percent; 0 when the non-fraud mean is not positive
    pub difference_percentage: f64,
}

/// Compare mean amounts of `Yes` and `No` claims; `None` unless both groups have claims
#[must_use]
pub fn fraud_amount_comparison(filtered: &FilteredClaims<'_>) -> Option<AmountComparison> {
    let flagged = |flag: FraudFlag| {
        filtered
            .iter()
            .filter(move |claim| claim.fraud == flag)
            .collect::<Vec<_>>()
    };
    let fraud = flagged(FraudFlag::Yes);
    let non_fraud = flagged(FraudFlag::No);
    if fraud.is_empty() || non_fraud.is_empty() {
        return None;
    }

    let fraud_mean = mean(fraud.iter().filter_map(|c| c.reimbursed_amount));
    let non_fraud_mean = mean(non_fraud.iter().filter_map(|c| c.reimbursed_amount));
    let difference_percentage = match (fraud_mean, non_fraud_mean) {
        (Some(f), Some(n)) if n > 0.0 => (f - n) / n * 100.0,
        _ => 0.0,
    };

    Some(AmountComparison {
        fraud_mean,
        non_fraud_mean,
        difference_percentage,
    })
}
