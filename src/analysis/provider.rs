//! Provider service mix and risk assessment.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use crate::analysis::{mean, percentage, round2};
use crate::config::RiskThresholds;
use crate::filter::FilteredClaims;
use crate::models::ClaimRecord;

/// Claim counts per claim type for one provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderMixRow {
    pub provider: String,
    /// One count per entry of [`ProviderClaimMix::claim_types`]
    pub counts: Vec<usize>,
    pub total: usize,
}

/// Wide provider-by-claim-type count table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProviderClaimMix {
    /// Column labels, sorted
    pub claim_types: Vec<String>,
    pub rows: Vec<ProviderMixRow>,
}

/// The `limit` providers with the most claims, with their claim type counts
///
/// Providers with equal totals keep provider order.
#[must_use]
pub fn provider_claim_mix(filtered: &FilteredClaims<'_>, limit: usize) -> ProviderClaimMix {
    let claim_types: BTreeSet<&str> = filtered.iter().map(|c| c.claim_type.label()).collect();
    let columns: BTreeMap<&str, usize> = claim_types
        .iter()
        .enumerate()
        .map(|(column, label)| (*label, column))
        .collect();

    let mut by_provider: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for claim in filtered.iter() {
        let counts = by_provider
            .entry(claim.provider.as_str())
            .or_insert_with(|| vec![0; columns.len()]);
        if let Some(&column) = columns.get(claim.claim_type.label()) {
            counts[column] += 1;
        }
    }

    let mut rows: Vec<ProviderMixRow> = by_provider
        .into_iter()
        .map(|(provider, counts)| ProviderMixRow {
            provider: provider.to_string(),
            total: counts.iter().sum(),
            counts,
        })
        .collect();
    rows.sort_by(|a, b| b.total.cmp(&a.total));
    rows.truncate(limit);

    ProviderClaimMix {
        claim_types: claim_types.into_iter().map(str::to_string).collect(),
        rows,
    }
}

/// Risk tier of a provider by fraud rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    High,
    Medium,
    Low,
}

impl RiskTier {
    /// Tier for a fraud rate in percent
    ///
    /// High above `thresholds.high`, medium above `thresholds.medium`, low
    /// otherwise; a rate equal to a threshold falls in the lower tier.
    #[must_use]
    pub fn classify(fraud_rate: f64, thresholds: &RiskThresholds) -> Self {
        if fraud_rate > thresholds.high {
            Self::High
        } else if fraud_rate > thresholds.medium {
            Self::Medium
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the provider risk assessment panel
///
/// Every value is rounded to two decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRisk {
    pub provider: String,
    /// Percentage of the provider's claims flagged as fraud
    pub fraud_rate: f64,
    pub mean_amount: Option<f64>,
    pub total_amount: f64,
    /// Claims with a reimbursed amount
    pub claim_count: usize,
    pub mean_length_of_stay: Option<f64>,
    pub tier: RiskTier,
}

impl ProviderRisk {
    fn from_claims(provider: &str, claims: &[&ClaimRecord], thresholds: &RiskThresholds) -> Self {
        let fraud = claims.iter().filter(|c| c.is_fraud()).count();
        let fraud_rate = round2(percentage(fraud, claims.len()));
        let amounts: Vec<f64> = claims.iter().filter_map(|c| c.reimbursed_amount).collect();

        Self {
            provider: provider.to_string(),
            fraud_rate,
            mean_amount: mean(amounts.iter().copied()).map(round2),
            total_amount: round2(amounts.iter().sum()),
            claim_count: amounts.len(),
            mean_length_of_stay: mean(
                claims
                    .iter()
                    .filter_map(|c| c.length_of_stay)
                    .map(f64::from),
            )
            .map(round2),
            tier: RiskTier::classify(fraud_rate, thresholds),
        }
    }
}

/// Top `limit` providers by fraud rate, each tagged with a risk tier
///
/// Providers with equal rates keep provider order.
#[must_use]
pub fn provider_risk_panel(
    filtered: &FilteredClaims<'_>,
    thresholds: &RiskThresholds,
    limit: usize,
) -> Vec<ProviderRisk> {
    let mut by_provider: BTreeMap<&str, Vec<&ClaimRecord>> = BTreeMap::new();
    for claim in filtered.iter() {
        by_provider
            .entry(claim.provider.as_str())
            .or_default()
            .push(claim);
    }

    let mut rows: Vec<ProviderRisk> = by_provider
        .into_iter()
        .map(|(provider, claims)| ProviderRisk::from_claims(provider, &claims, thresholds))
        .collect();
    rows.sort_by(|a, b| b.fraud_rate.total_cmp(&a.fraud_rate));
    rows.truncate(limit);
    rows
}
