use std::fs;
use std::path::{Path, PathBuf};

use claims_dash::{ClaimsDataset, DashboardConfig, Result};
use tempfile::TempDir;

/// Header row with every claims column
pub const FULL_HEADER: &str = "ClaimID,Provider,ClaimType,AttendingDate,ClaimEndDate,\
InscClaimAmtReimbursed,LengthOfStay,Gender,Race,ChronicConditionList,\
ChronicConditionCount,PotentialFraud,ClaimYear";

/// Sample rows for [`FULL_HEADER`]
///
/// Row 4 carries an unparseable date and unmapped gender/race codes; row 5
/// has no amount and an unrecognised fraud flag.
pub const SAMPLE_ROWS: [&str; 5] = [
    r#"CLM1,PRV1,Inpatient,01/02/2020,05/02/2020,5000,4,1,1,"Diabetes, Hypertension,Diabetes",3,Yes,2020"#,
    "CLM2,PRV1,Outpatient,03/04/2020,03/04/2020,200,0,2,4,Asthma,1,No,2020",
    r#"CLM3,PRV2,Inpatient,15/06/2019,20/06/2019,8000,5,2,5,"Hypertension",1,Yes,2019"#,
    "CLM4,PRV2,Outpatient,not a date,01/07/2019,150,,3,9,,0,No,2019",
    r#"CLM5,PRV3,Outpatient,12/12/2019,12/12/2019,,,1,2,"Asthma,COPD",2,maybe,2019"#,
];

/// Write a CSV file named `name` into `dir`
pub fn write_csv(dir: &Path, name: &str, header: &str, rows: &[&str]) -> PathBuf {
    let path = dir.join(name);
    let mut content = String::from(header);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(&path, content).expect("failed to write fixture CSV");
    path
}

/// Temporary directory holding the sample claims file
pub fn sample_claims_file() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = write_csv(dir.path(), "claims.csv", FULL_HEADER, &SAMPLE_ROWS);
    (dir, path)
}

/// Load the sample claims file
pub fn load_sample() -> Result<(TempDir, ClaimsDataset)> {
    let (dir, path) = sample_claims_file();
    let dataset = ClaimsDataset::load(&DashboardConfig::with_data_path(path))?;
    Ok((dir, dataset))
}

/// Load the sample rows that have a parseable attending date
pub fn load_dated_sample() -> Result<(TempDir, ClaimsDataset)> {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let rows: Vec<&str> = SAMPLE_ROWS
        .iter()
        .copied()
        .filter(|row| !row.contains("not a date"))
        .collect();
    let path = write_csv(dir.path(), "dated.csv", FULL_HEADER, &rows);
    let dataset = ClaimsDataset::load(&DashboardConfig::with_data_path(path))?;
    Ok((dir, dataset))
}
