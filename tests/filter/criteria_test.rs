use chrono::NaiveDate;
use claims_dash::filter::ALL_PROVIDERS;
use claims_dash::{
    ClaimType, DataSummary, DateRange, FilterCriteria, FilterOptions, FilteredClaims,
    FraudStatusLabel, Result,
};

use crate::utils::{load_dated_sample, load_sample};

fn ids(filtered: &FilteredClaims<'_>) -> Vec<String> {
    filtered.iter().map(|claim| claim.claim_id.clone()).collect()
}

/// Default criteria with the fraud filter opened to every claim
fn all_claims() -> FilterCriteria {
    FilterCriteria::default().with_fraud_labels(&[FraudStatusLabel::AllClaims])
}

#[test]
fn test_full_date_range_matches_no_date_filter() -> Result<()> {
    let (_dir, dataset) = load_dated_sample()?;
    let (min, max) = dataset.date_bounds().unwrap();

    let unfiltered = all_claims().apply(&dataset);
    let ranged = all_claims()
        .with_date_range(DateRange::between(min, max))
        .apply(&dataset);

    assert_eq!(ranged.len(), unfiltered.len());
    assert_eq!(ranged.len(), dataset.len());
    Ok(())
}

#[test]
fn test_date_range_narrows_and_drops_undated() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let range = DateRange::between(
        NaiveDate::from_ymd_opt(2019, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2019, 12, 31).unwrap(),
    );
    let filtered = all_claims().with_date_range(range).apply(&dataset);
    assert_eq!(ids(&filtered), ["CLM3", "CLM5"]);
    Ok(())
}

#[test]
fn test_provider_and_fraud_status() -> Result<()> {
    let (_dir, dataset) = load_sample()?;

    let filtered = FilterCriteria::default()
        .with_provider("PRV2")
        .with_fraud_labels(&[FraudStatusLabel::PotentialFraud])
        .apply(&dataset);
    assert_eq!(ids(&filtered), ["CLM3"]);

    let filtered = FilterCriteria::default()
        .with_provider(ALL_PROVIDERS)
        .with_fraud_labels(&[FraudStatusLabel::NoFraud, FraudStatusLabel::AllClaims])
        .apply(&dataset);
    assert_eq!(filtered.len(), 5);

    Ok(())
}

#[test]
fn test_fraud_labels_parse_from_ui_values() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let labels = ["No Fraud"]
        .iter()
        .map(|label| label.parse::<FraudStatusLabel>())
        .collect::<Result<Vec<_>>>()?;

    let filtered = FilterCriteria::default()
        .with_fraud_labels(&labels)
        .apply(&dataset);
    assert_eq!(ids(&filtered), ["CLM2", "CLM4"]);
    Ok(())
}

#[test]
fn test_unrecognised_fraud_flag_only_in_all_claims() -> Result<()> {
    let (_dir, dataset) = load_sample()?;

    let default_view = FilterCriteria::default().apply(&dataset);
    assert_eq!(ids(&default_view), ["CLM1", "CLM2", "CLM3", "CLM4"]);

    let every_claim = all_claims().apply(&dataset);
    assert_eq!(every_claim.len(), 5);
    Ok(())
}

#[test]
fn test_claim_type_selection() -> Result<()> {
    let (_dir, dataset) = load_sample()?;

    let inpatient = FilterCriteria::default()
        .with_claim_types(vec![ClaimType::Inpatient])
        .apply(&dataset);
    assert_eq!(ids(&inpatient), ["CLM1", "CLM3"]);

    let none_selected = all_claims().with_claim_types(Vec::new()).apply(&dataset);
    assert_eq!(none_selected.len(), 5);
    Ok(())
}

#[test]
fn test_filtering_leaves_dataset_untouched() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let before = dataset.claims().to_vec();

    let filtered = FilterCriteria::default().with_provider("PRV1").apply(&dataset);
    assert_eq!(filtered.len(), 2);
    assert_eq!(dataset.claims(), before.as_slice());
    Ok(())
}

#[test]
fn test_options_and_summary() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let criteria = FilterCriteria::default();

    let options = FilterOptions::for_criteria(&dataset, &criteria);
    assert_eq!(options.providers, ["PRV1", "PRV2", "PRV3"]);
    assert_eq!(
        options.claim_types,
        [ClaimType::Inpatient, ClaimType::Outpatient]
    );
    assert_eq!(options.min_date, NaiveDate::from_ymd_opt(2019, 6, 15));
    assert_eq!(options.max_date, NaiveDate::from_ymd_opt(2020, 4, 3));

    let summary = DataSummary::of(&criteria.apply(&dataset));
    assert_eq!(summary.total_records, 4);
    assert_eq!(summary.start_date, options.min_date);
    assert_eq!(summary.end_date, options.max_date);
    Ok(())
}
