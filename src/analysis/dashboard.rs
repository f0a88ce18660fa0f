//! Everything the presentation layer renders for one filter state.

use serde::Serialize;

use crate::analysis::conditions::{
    ConditionCount, ConditionFraudRate, condition_fraud_rates, top_conditions,
};
use crate::analysis::correlation::{ScatterSeries, condition_count_scatter, length_of_stay_scatter};
use crate::analysis::distribution::{
    CategoryCount, claim_type_counts, fraud_status_counts, gender_counts, male_share, race_counts,
};
use crate::analysis::financial::{
    AmountComparison, AmountSummary, ProviderMeanAmount, amount_summaries,
    fraud_amount_comparison, provider_mean_amounts,
};
use crate::analysis::kpi::Kpis;
use crate::analysis::provider::{
    ProviderClaimMix, ProviderRisk, provider_claim_mix, provider_risk_panel,
};
use crate::analysis::temporal::{
    MonthlyTrend, YearlyCount, latest_year_fraud_count, monthly_trends, yearly_counts,
};
use crate::config::DashboardConfig;
use crate::filter::{DataSummary, FilterCriteria, FilteredClaims};
use crate::loader::ClaimsDataset;

/// Distributions of the categorical attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewTab {
    pub fraud_status: Vec<CategoryCount>,
    pub claim_types: Vec<CategoryCount>,
    pub genders: Vec<CategoryCount>,
    pub races: Vec<CategoryCount>,
    /// Percentage of male claimants among known genders
    pub male_share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialTab {
    pub amount_summaries: Vec<AmountSummary>,
    pub fraud_amount_comparison: Option<AmountComparison>,
    pub provider_mean_amounts: Vec<ProviderMeanAmount>,
    pub top_provider: Option<ProviderMeanAmount>,
    /// Inpatient length of stay against amount
    pub length_of_stay: ScatterSeries,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRiskTab {
    pub claim_mix: ProviderClaimMix,
    pub risk_panel: Vec<ProviderRisk>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalTab {
    pub yearly: Vec<YearlyCount>,
    pub latest_year_fraud: Option<YearlyCount>,
    pub monthly: Vec<MonthlyTrend>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MedicalTab {
    /// Chronic condition count against amount
    pub condition_count: ScatterSeries,
    /// Ranking over the filtered subset's condition occurrences
    pub top_conditions: Vec<ConditionCount>,
    pub most_common_condition: Option<ConditionCount>,
    pub condition_fraud_rates: Vec<ConditionFraudRate>,
    pub highest_risk_condition: Option<ConditionFraudRate>,
}

/// All dashboard outputs for one filtered subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub summary: DataSummary,
    pub kpis: Kpis,
    pub overview: OverviewTab,
    pub financial: FinancialTab,
    pub provider_risk: ProviderRiskTab,
    pub temporal: TemporalTab,
    pub medical: MedicalTab,
}

impl DashboardSnapshot {
    /// Compute every output for a filtered subset
    #[must_use]
    pub fn build(filtered: &FilteredClaims<'_>, config: &DashboardConfig) -> Self {
        let limits = &config.limits;

        let provider_mean_amounts = provider_mean_amounts(filtered, limits.provider_mean_amount);
        let yearly = yearly_counts(filtered);
        let occurrences = filtered.conditions();
        let top_conditions = top_conditions(
            occurrences.iter().map(|occurrence| occurrence.condition),
            limits.conditions,
        );
        let condition_fraud_rates =
            condition_fraud_rates(&occurrences, limits.condition_fraud_rates);

        Self {
            summary: DataSummary::of(filtered),
            kpis: Kpis::compute(filtered),
            overview: OverviewTab {
                fraud_status: fraud_status_counts(filtered),
                claim_types: claim_type_counts(filtered),
                genders: gender_counts(filtered),
                races: race_counts(filtered),
                male_share: male_share(filtered),
            },
            financial: FinancialTab {
                amount_summaries: amount_summaries(filtered),
                fraud_amount_comparison: fraud_amount_comparison(filtered),
                top_provider: provider_mean_amounts.first().cloned(),
                provider_mean_amounts,
                length_of_stay: length_of_stay_scatter(filtered),
            },
            provider_risk: ProviderRiskTab {
                claim_mix: provider_claim_mix(filtered, limits.provider_claim_mix),
                risk_panel: provider_risk_panel(
                    filtered,
                    &config.risk_thresholds,
                    limits.risk_panel,
                ),
            },
            temporal: TemporalTab {
                latest_year_fraud: latest_year_fraud_count(&yearly),
                yearly,
                monthly: monthly_trends(filtered),
            },
            medical: MedicalTab {
                condition_count: condition_count_scatter(filtered),
                most_common_condition: top_conditions.first().cloned(),
                top_conditions,
                highest_risk_condition: condition_fraud_rates.first().cloned(),
                condition_fraud_rates,
            },
        }
    }

    /// Filter `dataset` with `criteria` and compute every output
    #[must_use]
    pub fn for_criteria(
        dataset: &ClaimsDataset,
        criteria: &FilterCriteria,
        config: &DashboardConfig,
    ) -> Self {
        let filtered = criteria.apply(dataset);
        Self::build(&filtered, config)
    }
}
