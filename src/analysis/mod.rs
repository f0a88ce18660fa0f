//! Aggregations over the filtered claims
//!
//! Every function here is a pure function of a [`FilteredClaims`] subset
//! (or of condition occurrences derived from it) and treats an empty input
//! as valid, producing zero or empty results.
//!
//! [`FilteredClaims`]: crate::filter::FilteredClaims

pub mod conditions;
pub mod correlation;
pub mod dashboard;
pub mod distribution;
pub mod financial;
pub mod kpi;
pub mod provider;
pub mod temporal;

use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::FxHashMap;

pub use conditions::{ConditionCount, ConditionFraudRate, condition_fraud_rates, top_conditions};
pub use correlation::{
    LinearFit, ScatterPoint, ScatterSeries, TrendLine, condition_count_scatter,
    condition_count_vs_amount, length_of_stay_scatter, length_of_stay_vs_amount, ols_fit, pearson,
};
pub use dashboard::{
    DashboardSnapshot, FinancialTab, MedicalTab, OverviewTab, ProviderRiskTab, TemporalTab,
};
pub use distribution::{
    CategoryCount, claim_type_counts, fraud_status_counts, gender_counts, male_share, race_counts,
};
pub use financial::{
    AmountComparison, AmountSummary, ProviderMeanAmount, amount_summaries, fraud_amount_comparison,
    provider_mean_amounts,
};
pub use kpi::Kpis;
pub use provider::{
    ProviderClaimMix, ProviderMixRow, ProviderRisk, RiskTier, provider_claim_mix,
    provider_risk_panel,
};
pub use temporal::{
    MonthlyTrend, YearlyCount, latest_year_fraud_count, monthly_trends, yearly_counts,
};

/// Count occurrences of each key
///
/// Result is sorted by count descending; equal counts keep the order in
/// which the keys were first encountered.
pub(crate) fn count_by_first_seen<K, I>(keys: I) -> Vec<(K, usize)>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut index: FxHashMap<K, usize> = FxHashMap::default();
    let mut counts: Vec<(K, usize)> = Vec::new();

    for key in keys {
        match index.get(&key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.clone(), counts.len());
                counts.push((key, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Arithmetic mean; `None` for no values
pub(crate) fn mean<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), value| (sum + value, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// `part / total * 100`, or 0 when `total` is 0
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Round to two decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Descending order of optional values, missing values last
pub(crate) fn descending_missing_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Quantile of ascending-sorted values with linear interpolation
pub(crate) fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    match sorted.len() {
        0 => None,
        1 => Some(sorted[0]),
        n => {
            let position = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lower = position.floor() as usize;
            let upper = position.ceil() as usize;
            let fraction = position - lower as f64;
            Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
        }
    }
}
