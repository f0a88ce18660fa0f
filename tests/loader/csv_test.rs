use chrono::NaiveDate;
use claims_dash::analysis::condition_count_scatter;
use claims_dash::{
    ClaimType, ClaimsDataset, DashboardConfig, DashboardError, FilteredClaims, FraudFlag, Gender,
    Race, Result,
};

use crate::utils::{FULL_HEADER, load_sample, write_csv};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_prepares_every_column() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    assert_eq!(dataset.len(), 5);
    assert!(dataset.source().is_some());

    let first = &dataset.claims()[0];
    assert_eq!(first.claim_id, "CLM1");
    assert_eq!(first.provider, "PRV1");
    assert_eq!(first.claim_type, ClaimType::Inpatient);
    assert_eq!(first.attending_date, Some(date(2020, 2, 1)));
    assert_eq!(first.claim_end_date, Some(date(2020, 2, 5)));
    assert_eq!(first.claim_duration(), Some(5));
    assert_eq!(first.reimbursed_amount, Some(5000.0));
    assert_eq!(first.length_of_stay, Some(4));
    assert_eq!(first.gender, Gender::Male);
    assert_eq!(first.race, Race::White);
    assert_eq!(
        first.chronic_conditions.as_slice(),
        ["Diabetes", "Hypertension", "Diabetes"]
    );
    assert_eq!(first.chronic_condition_count, Some(3));
    assert_eq!(first.fraud, FraudFlag::Yes);
    assert_eq!(first.claim_year, Some(2020));

    Ok(())
}

#[test]
fn test_day_first_dates_and_race_collapse() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let claims = dataset.claims();

    // "03/04/2020" is the 3rd of April
    assert_eq!(claims[1].attending_date, Some(date(2020, 4, 3)));
    assert_eq!(claims[1].gender, Gender::Female);
    assert_eq!(claims[1].race, Race::Other);
    assert_eq!(claims[2].race, Race::Other);

    Ok(())
}

#[test]
fn test_row_issues_resolve_to_missing_values() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let claims = dataset.claims();

    let undated = &claims[3];
    assert_eq!(undated.attending_date, None);
    assert_eq!(undated.claim_duration(), None);
    assert_eq!(undated.gender, Gender::Unknown);
    assert_eq!(undated.race, Race::Unknown);
    assert_eq!(undated.length_of_stay, None);
    assert!(undated.chronic_conditions.is_empty());

    let unflagged = &claims[4];
    assert_eq!(unflagged.fraud, FraudFlag::Unknown);
    assert_eq!(unflagged.reimbursed_amount, None);

    let report = dataset.report();
    assert_eq!(report.rows, 5);
    assert_eq!(report.batches, 1);
    assert_eq!(report.unparsed_dates, 1);
    assert_eq!(report.unmapped_gender, 1);
    assert_eq!(report.unmapped_race, 1);
    assert_eq!(report.unknown_fraud_flags, 1);
    assert_eq!(report.invalid_length_of_stay, 0);
    assert_eq!(report.issue_count(), 4);

    Ok(())
}

#[test]
fn test_flat_condition_list_keeps_row_order() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    assert_eq!(
        dataset.conditions(),
        [
            "Diabetes",
            "Hypertension",
            "Diabetes",
            "Asthma",
            "Hypertension",
            "Asthma",
            "COPD"
        ]
    );
    Ok(())
}

#[test]
fn test_small_batches_yield_same_rows() -> Result<()> {
    let (_dir, dataset) = load_sample()?;
    let path = dataset.source().unwrap().to_path_buf();

    let config = DashboardConfig {
        batch_size: 2,
        ..DashboardConfig::with_data_path(path)
    };
    let batched = ClaimsDataset::load(&config)?;
    assert_eq!(batched.report().batches, 3);
    assert_eq!(batched.claims(), dataset.claims());

    Ok(())
}

#[test]
fn test_optional_columns_fall_back() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "claims.csv",
        "ClaimID,Provider,ClaimType,AttendingDate,ClaimEndDate,InscClaimAmtReimbursed,\
         LengthOfStay,Gender,Race,ChronicConditionList,PotentialFraud",
        &[r#"CLM1,PRV1,Inpatient,01/02/2021,02/02/2021,100,1,1,3,"A,B",No"#],
    );

    let dataset = ClaimsDataset::load(&DashboardConfig::with_data_path(path))?;
    let claim = &dataset.claims()[0];
    assert_eq!(claim.claim_year, None);
    assert_eq!(claim.year(), Some(2021));
    assert_eq!(claim.chronic_condition_count, Some(2));
    assert_eq!(claim.condition_count(), Some(2));
    assert_eq!(claim.race, Race::Asian);

    Ok(())
}

#[test]
fn test_blank_condition_count_stays_missing() -> Result<()> {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(
        dir.path(),
        "claims.csv",
        FULL_HEADER,
        &[
            r#"CLM1,PRV1,Outpatient,01/02/2020,01/02/2020,100,0,1,1,"A,B",,No,2020"#,
            "CLM2,PRV1,Outpatient,02/02/2020,02/02/2020,200,0,1,1,A,1,No,2020",
            r#"CLM3,PRV1,Outpatient,03/02/2020,03/02/2020,400,0,1,1,"A,B,C",3,No,2020"#,
        ],
    );

    let dataset = ClaimsDataset::load(&DashboardConfig::with_data_path(path))?;
    let claim = &dataset.claims()[0];
    assert_eq!(claim.chronic_conditions.len(), 2);
    assert_eq!(claim.condition_count(), None);

    let filtered = FilteredClaims::all(&dataset);
    assert_eq!(condition_count_scatter(&filtered).points.len(), 2);
    Ok(())
}

#[test]
fn test_missing_required_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let header = FULL_HEADER.replace(",PotentialFraud", "");
    let path = write_csv(
        dir.path(),
        "claims.csv",
        &header,
        &["CLM1,PRV1,Inpatient,01/02/2020,05/02/2020,5000,4,1,1,Diabetes,1,2020"],
    );

    let result = ClaimsDataset::load(&DashboardConfig::with_data_path(path));
    match result {
        Err(DashboardError::ColumnNotFound { column }) => assert_eq!(column, "PotentialFraud"),
        other => panic!("expected ColumnNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig::with_data_path(dir.path().join("absent.csv"));
    assert!(matches!(
        ClaimsDataset::load(&config),
        Err(DashboardError::Io { .. })
    ));
}
