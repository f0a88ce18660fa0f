//! Yearly and monthly claim trends split by fraud flag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::filter::FilteredClaims;
use crate::models::FraudFlag;
use crate::utils::TimePeriod;

/// Claims in one year with one fraud flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearlyCount {
    pub year: i32,
    pub fraud: FraudFlag,
    pub count: usize,
}

/// Claim counts per (year, fraud flag), ordered by year then flag
///
/// Claims with no year are left out.
#[must_use]
pub fn yearly_counts(filtered: &FilteredClaims<'_>) -> Vec<YearlyCount> {
    let mut counts: BTreeMap<(i32, FraudFlag), usize> = BTreeMap::new();
    for claim in filtered.iter() {
        if let Some(year) = claim.year() {
            *counts.entry((year, claim.fraud)).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, fraud), count)| YearlyCount { year, fraud, count })
        .collect()
}

/// Fraud claim count of the latest year that has any fraud claims
#[must_use]
pub fn latest_year_fraud_count(yearly: &[YearlyCount]) -> Option<YearlyCount> {
    yearly
        .iter()
        .filter(|row| row.fraud.is_fraud())
        .max_by_key(|row| row.year)
        .copied()
}

/// Claim volume and reimbursed total in one month with one fraud flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTrend {
    /// Calendar month of the attending date, `YYYY-MM`
    pub month: TimePeriod,
    pub fraud: FraudFlag,
    /// Sum of reimbursed amounts, missing amounts counting as zero
    pub total_amount: f64,
    pub claim_count: usize,
}

/// Monthly sums and counts per fraud flag, ordered by month then flag
///
/// Claims without an attending date are left out.
#[must_use]
pub fn monthly_trends(filtered: &FilteredClaims<'_>) -> Vec<MonthlyTrend> {
    let mut groups: BTreeMap<(TimePeriod, FraudFlag), (f64, usize)> = BTreeMap::new();
    for claim in filtered.iter() {
        if let Some(month) = claim.month() {
            let (total, count) = groups.entry((month, claim.fraud)).or_insert((0.0, 0));
            *total += claim.reimbursed_amount.unwrap_or(0.0);
            *count += 1;
        }
    }

    groups
        .into_iter()
        .map(|((month, fraud), (total_amount, claim_count))| MonthlyTrend {
            month,
            fraud,
            total_amount,
            claim_count,
        })
        .collect()
}
