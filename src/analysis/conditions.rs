//! Chronic condition rankings for the medical tab.

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::analysis::{count_by_first_seen, percentage};
use crate::models::ConditionOccurrence;

/// Occurrences of one chronic condition
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCount {
    pub condition: String,
    pub count: usize,
}

/// The `limit` most frequent conditions, ties in first-encountered order
pub fn top_conditions<'a, I>(conditions: I, limit: usize) -> Vec<ConditionCount>
where
    I: IntoIterator<Item = &'a str>,
{
    count_by_first_seen(conditions)
        .into_iter()
        .take(limit)
        .map(|(condition, count)| ConditionCount {
            condition: condition.to_string(),
            count,
        })
        .collect()
}

/// Share of a condition's occurrences that belong to fraud claims
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionFraudRate {
    pub condition: String,
    /// Percentage of occurrences on fraud claims
    pub fraud_rate: f64,
    pub occurrences: usize,
}

/// The `limit` conditions with the highest fraud rate
///
/// Ties keep the order in which conditions were first encountered.
#[must_use]
pub fn condition_fraud_rates(
    occurrences: &[ConditionOccurrence<'_>],
    limit: usize,
) -> Vec<ConditionFraudRate> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut tallies: Vec<(&str, usize, usize)> = Vec::new();

    for occurrence in occurrences {
        let slot = *index.entry(occurrence.condition).or_insert_with(|| {
            tallies.push((occurrence.condition, 0, 0));
            tallies.len() - 1
        });
        let (_, fraud, total) = &mut tallies[slot];
        *total += 1;
        if occurrence.fraud.is_fraud() {
            *fraud += 1;
        }
    }

    let mut rates: Vec<ConditionFraudRate> = tallies
        .into_iter()
        .map(|(condition, fraud, total)| ConditionFraudRate {
            condition: condition.to_string(),
            fraud_rate: percentage(fraud, total),
            occurrences: total,
        })
        .collect();
    rates.sort_by(|a, b| b.fraud_rate.total_cmp(&a.fraud_rate));
    rates.truncate(limit);
    rates
}
