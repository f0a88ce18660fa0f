use claims_dash::analysis::{
    claim_type_counts, fraud_status_counts, gender_counts, length_of_stay_vs_amount, race_counts,
};
use claims_dash::{
    ClaimType, DashboardConfig, DashboardSnapshot, DateRange, FilterCriteria, FraudStatusLabel,
    Kpis, Result, RiskTier,
};

use crate::utils::load_sample;

/// A spread of filter states used for property checks
fn criteria_grid() -> Vec<FilterCriteria> {
    let mut grid = Vec::new();
    for provider in ["All Providers", "PRV1", "PRV2", "PRV9"] {
        for labels in [
            vec![FraudStatusLabel::AllClaims],
            vec![FraudStatusLabel::PotentialFraud],
            vec![FraudStatusLabel::NoFraud],
            vec![FraudStatusLabel::PotentialFraud, FraudStatusLabel::NoFraud],
        ] {
            for claim_types in [Vec::new(), vec![ClaimType::Outpatient]] {
                grid.push(
                    FilterCriteria::default()
                        .with_provider(provider)
                        .with_fraud_labels(&labels)
                        .with_claim_types(claim_types.clone()),
                );
            }
        }
    }
    grid
}

/// Default criteria with the fraud filter opened to every claim
fn all_claims() -> FilterCriteria {
    FilterCriteria::default().with_fraud_labels(&[FraudStatusLabel::AllClaims])
}

#[test]
fn test_kpis_on_sample() -> Result<()> {
    let (_dir, dataset) = load_sample()?;

    let kpis = Kpis::compute(&all_claims().apply(&dataset));
    assert_eq!(kpis.total_claims, 5);
    assert_eq!(kpis.fraud_claims, 2);
    assert_eq!(kpis.fraud_percentage, 40.0);
    assert_eq!(kpis.mean_reimbursed_amount, Some(3337.5));
    assert_eq!(kpis.mean_length_of_stay, Some(3.0));

    // The unrecognised flag on CLM5 keeps it out of the default view
    let kpis = Kpis::compute(&FilterCriteria::default().apply(&dataset));
    assert_eq!(kpis.total_claims, 4);
    assert_eq!(kpis.fraud_percentage, 50.0);
    Ok(())
}

#[test]
fn test_fraud_share_bounds_hold_for_every_filter() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    for criteria in criteria_grid() {
        let kpis = Kpis::compute(&criteria.apply(&dataset));
        assert!(kpis.fraud_claims <= kpis.total_claims);
        assert!((0.0..=100.0).contains(&kpis.fraud_percentage));
    }
    Ok(())
}

#[test]
fn test_distributions_sum_to_row_count() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    for criteria in criteria_grid() {
        let filtered = criteria.apply(&dataset);
        for counts in [
            fraud_status_counts(&filtered),
            claim_type_counts(&filtered),
            gender_counts(&filtered),
            race_counts(&filtered),
        ] {
            let total: usize = counts.iter().map(|c| c.count).sum();
            assert_eq!(total, filtered.len());
        }
    }
    Ok(())
}

#[test]
fn test_snapshot_on_sample() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let config = DashboardConfig::default();
    let snapshot = DashboardSnapshot::for_criteria(&dataset, &all_claims(), &config);

    let panel: Vec<(&str, f64, RiskTier)> = snapshot
        .provider_risk
        .risk_panel
        .iter()
        .map(|row| (row.provider.as_str(), row.fraud_rate, row.tier))
        .collect();
    assert_eq!(
        panel,
        [
            ("PRV1", 50.0, RiskTier::High),
            ("PRV2", 50.0, RiskTier::High),
            ("PRV3", 0.0, RiskTier::Low),
        ]
    );

    let conditions: Vec<(&str, usize)> = snapshot
        .medical
        .top_conditions
        .iter()
        .map(|c| (c.condition.as_str(), c.count))
        .collect();
    assert_eq!(
        conditions,
        [("Diabetes", 2), ("Hypertension", 2), ("Asthma", 2), ("COPD", 1)]
    );

    let filtered = all_claims().apply(&dataset);
    let correlation = length_of_stay_vs_amount(&filtered).unwrap();
    assert!((correlation - 1.0).abs() < 1e-9);
    assert_eq!(snapshot.financial.length_of_stay.correlation, Some(correlation));

    let latest = snapshot.temporal.latest_year_fraud.unwrap();
    assert_eq!((latest.year, latest.count), (2020, 1));
    Ok(())
}

#[test]
fn test_snapshot_is_repeatable() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let config = DashboardConfig::default();
    let criteria = FilterCriteria::default().with_date_range(DateRange::default());

    let first = DashboardSnapshot::for_criteria(&dataset, &criteria, &config);
    let second = DashboardSnapshot::for_criteria(&dataset, &criteria, &config);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
    Ok(())
}

#[test]
fn test_empty_subset_yields_empty_outputs() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let config = DashboardConfig::default();
    let criteria = FilterCriteria::default().with_provider("PRV9");
    let snapshot = DashboardSnapshot::for_criteria(&dataset, &criteria, &config);

    assert_eq!(snapshot.kpis, Kpis::default());
    assert!(snapshot.financial.provider_mean_amounts.is_empty());
    assert!(snapshot.provider_risk.claim_mix.rows.is_empty());
    assert!(snapshot.provider_risk.risk_panel.is_empty());
    assert!(snapshot.medical.top_conditions.is_empty());
    assert!(snapshot.medical.most_common_condition.is_none());
    assert!(snapshot.medical.condition_fraud_rates.is_empty());
    assert!(snapshot.temporal.monthly.is_empty());
    Ok(())
}
