//! Claims CSV loading
//!
//! The source file is decoded into Arrow record batches, each batch is
//! projected onto the claims schema, and rows are converted into
//! [`ClaimRecord`]s. Per-row problems (unparseable dates, unmapped codes)
//! never abort the load; they are resolved to missing values and tallied in
//! a [`LoadReport`]. A missing or unreadable file is fatal.

use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use itertools::{Itertools, MinMaxResult};
use log::{debug, info, warn};
use rustc_hash::FxHashMap;

use crate::config::DashboardConfig;
use crate::error::util::safe_open_file;
use crate::error::{DashboardError, Result};
use crate::models::{ClaimRecord, ClaimType, FraudFlag, Gender, Race, split_condition_list};
use crate::schema::{self, DateFormatConfig, parse_date_string};
use crate::utils::arrow::{
    float64_column, float64_value, int64_column, int64_value, normalize_batch, string_column,
    string_value,
};

/// Counts of recoverable per-row issues found while loading
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub batches: usize,
    /// Date cells present but not parseable as day-first dates
    pub unparsed_dates: usize,
    pub unmapped_gender: usize,
    pub unmapped_race: usize,
    /// Fraud flags other than yes/no, loaded as `Unknown`
    pub unknown_fraud_flags: usize,
    /// Negative or fractional lengths of stay, loaded as missing
    pub invalid_length_of_stay: usize,
}

impl LoadReport {
    /// Total number of recoverable issues
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.unparsed_dates
            + self.unmapped_gender
            + self.unmapped_race
            + self.unknown_fraud_flags
            + self.invalid_length_of_stay
    }
}

/// The immutable, fully prepared claims dataset
///
/// Loaded once and shared by reference with the filter and aggregation
/// stages; nothing mutates it after construction.
#[derive(Debug, Clone, Default)]
pub struct ClaimsDataset {
    claims: Vec<ClaimRecord>,
    conditions: Vec<String>,
    source: Option<PathBuf>,
    report: LoadReport,
}

impl ClaimsDataset {
    /// Load and prepare the dataset at `config.data_path`
    pub fn load(config: &DashboardConfig) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();
        let path = config.data_path.as_path();
        info!("Loading claims data from: {}", path.display());

        let batches = read_claims_csv(path, config)?;
        let mut report = LoadReport {
            batches: batches.len(),
            ..LoadReport::default()
        };

        let mut claims = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
        for batch in &batches {
            claims.extend(claims_from_batch(batch, &config.date_format_config, &mut report)?);
        }

        info!(
            "Loaded {} claims from {} batches in {:?}",
            claims.len(),
            report.batches,
            start.elapsed()
        );
        if report.issue_count() > 0 {
            warn!(
                "Recoverable row issues: {} unparsed dates, {} unmapped gender codes, \
                 {} unmapped race codes, {} unknown fraud flags, {} invalid lengths of stay",
                report.unparsed_dates,
                report.unmapped_gender,
                report.unmapped_race,
                report.unknown_fraud_flags,
                report.invalid_length_of_stay
            );
        }

        let mut dataset = Self::from_records(claims);
        dataset.source = Some(path.to_path_buf());
        dataset.report = report;
        Ok(dataset)
    }

    /// Build a dataset from already prepared claims
    #[must_use]
    pub fn from_records(claims: Vec<ClaimRecord>) -> Self {
        let conditions = claims
            .iter()
            .flat_map(|claim| claim.chronic_conditions.iter().cloned())
            .collect();
        let report = LoadReport {
            rows: claims.len(),
            ..LoadReport::default()
        };
        Self {
            claims,
            conditions,
            source: None,
            report,
        }
    }

    #[must_use]
    pub fn claims(&self) -> &[ClaimRecord] {
        &self.claims
    }

    /// Every condition token across all claims, in row then list order
    #[must_use]
    pub fn conditions(&self) -> &[String] {
        &self.conditions
    }

    #[must_use]
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Path the dataset was loaded from, if any
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Earliest and latest attending date
    #[must_use]
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        attending_date_bounds(self.claims.iter())
    }
}

/// Earliest and latest attending date of the given claims
pub fn attending_date_bounds<'a>(
    claims: impl Iterator<Item = &'a ClaimRecord>,
) -> Option<(NaiveDate, NaiveDate)> {
    match claims.filter_map(|claim| claim.attending_date).minmax() {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(date) => Some((date, date)),
        MinMaxResult::MinMax(min, max) => Some((min, max)),
    }
}

/// Decode the claims CSV into Arrow record batches
///
/// The schema is inferred from the file, then every required column is
/// checked for presence before decoding.
pub fn read_claims_csv(path: &Path, config: &DashboardConfig) -> Result<Vec<RecordBatch>> {
    let mut file = safe_open_file(path, "loading claims data")?;

    let format = Format::default().with_header(true);
    let (file_schema, records_scanned) =
        format.infer_schema(&mut file, config.schema_inference_records)?;
    debug!(
        "Inferred schema from {records_scanned} records: {:?}",
        file_schema
            .fields()
            .iter()
            .map(|f| format!("{} ({})", f.name(), f.data_type()))
            .collect::<Vec<_>>()
    );

    let missing = schema::missing_required_columns(&file_schema);
    if !missing.is_empty() {
        return Err(DashboardError::ColumnNotFound {
            column: missing.join(", "),
        });
    }

    file.rewind().map_err(|e| {
        DashboardError::io_with_source("Failed to rewind claims file after inference", path, e)
    })?;

    let reader = ReaderBuilder::new(Arc::new(file_schema))
        .with_header(true)
        .with_batch_size(config.batch_size)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    debug!(
        "Decoded {} batches with {} total rows",
        batches.len(),
        batches.iter().map(RecordBatch::num_rows).sum::<usize>()
    );
    Ok(batches)
}

/// Convert one decoded batch into claims, tallying row issues in `report`
pub fn claims_from_batch(
    batch: &RecordBatch,
    date_config: &DateFormatConfig,
    report: &mut LoadReport,
) -> Result<Vec<ClaimRecord>> {
    let has_condition_counts = batch
        .schema()
        .column_with_name(schema::CHRONIC_CONDITION_COUNT)
        .is_some();
    let batch = normalize_batch(batch)?;

    let claim_ids = string_column(&batch, schema::CLAIM_ID)?;
    let providers = string_column(&batch, schema::PROVIDER)?;
    let claim_types = string_column(&batch, schema::CLAIM_TYPE)?;
    let attending_dates = string_column(&batch, schema::ATTENDING_DATE)?;
    let end_dates = string_column(&batch, schema::CLAIM_END_DATE)?;
    let amounts = float64_column(&batch, schema::REIMBURSED_AMOUNT)?;
    let lengths_of_stay = float64_column(&batch, schema::LENGTH_OF_STAY)?;
    let genders = int64_column(&batch, schema::GENDER)?;
    let races = int64_column(&batch, schema::RACE)?;
    let condition_lists = string_column(&batch, schema::CHRONIC_CONDITION_LIST)?;
    let condition_counts = int64_column(&batch, schema::CHRONIC_CONDITION_COUNT)?;
    let fraud_flags = string_column(&batch, schema::POTENTIAL_FRAUD)?;
    let claim_years = int64_column(&batch, schema::CLAIM_YEAR)?;

    let mut claims = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let gender = Gender::from(int64_value(genders, row));
        let race = Race::from(int64_value(races, row));
        if gender == Gender::Unknown {
            report.unmapped_gender += 1;
        }
        if race == Race::Unknown {
            report.unmapped_race += 1;
        }

        let chronic_conditions = string_value(condition_lists, row)
            .map(split_condition_list)
            .unwrap_or_default();
        let chronic_condition_count = if has_condition_counts {
            int64_value(condition_counts, row).and_then(|count| u32::try_from(count).ok())
        } else {
            u32::try_from(chronic_conditions.len()).ok()
        };

        claims.push(ClaimRecord {
            claim_id: string_value(claim_ids, row).unwrap_or_default().to_string(),
            provider: string_value(providers, row).unwrap_or_default().to_string(),
            claim_type: string_value(claim_types, row)
                .map_or_else(ClaimType::unknown, ClaimType::from),
            attending_date: date_cell(string_value(attending_dates, row), date_config, report),
            claim_end_date: date_cell(string_value(end_dates, row), date_config, report),
            reimbursed_amount: float64_value(amounts, row),
            length_of_stay: length_of_stay_cell(float64_value(lengths_of_stay, row), report),
            gender,
            race,
            chronic_conditions,
            chronic_condition_count,
            fraud: fraud_cell(string_value(fraud_flags, row), report),
            claim_year: int64_value(claim_years, row).and_then(|year| i32::try_from(year).ok()),
        });
    }

    report.rows += claims.len();
    Ok(claims)
}

fn date_cell(
    raw: Option<&str>,
    date_config: &DateFormatConfig,
    report: &mut LoadReport,
) -> Option<NaiveDate> {
    let parsed = parse_date_string(raw?, date_config);
    if parsed.is_none() {
        report.unparsed_dates += 1;
    }
    parsed
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn length_of_stay_cell(days: Option<f64>, report: &mut LoadReport) -> Option<u32> {
    let days = days?;
    if days >= 0.0 && days.fract() == 0.0 && days <= f64::from(u32::MAX) {
        Some(days as u32)
    } else {
        report.invalid_length_of_stay += 1;
        None
    }
}

fn fraud_cell(raw: Option<&str>, report: &mut LoadReport) -> FraudFlag {
    match raw.and_then(FraudFlag::parse) {
        Some(flag) => flag,
        None => {
            report.unknown_fraud_flags += 1;
            FraudFlag::Unknown
        }
    }
}

/// Config fields that determine how a source file is parsed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LoadKey {
    path: PathBuf,
    batch_size: usize,
    schema_inference_records: Option<usize>,
    date_format_config: DateFormatConfig,
}

impl From<&DashboardConfig> for LoadKey {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            path: config.data_path.clone(),
            batch_size: config.batch_size,
            schema_inference_records: config.schema_inference_records,
            date_format_config: config.date_format_config.clone(),
        }
    }
}

/// Load-once cache of prepared datasets
///
/// Keyed by source path together with the parsing settings of the config
/// (batch size, schema inference depth, date formats); limits and risk
/// thresholds do not take part. Constructed explicitly by the host and
/// passed to whoever needs the dataset. Repeated requests with the same key
/// return the same `Arc` without re-reading the file.
#[derive(Debug, Default)]
pub struct DatasetCache {
    datasets: Mutex<FxHashMap<LoadKey, Arc<ClaimsDataset>>>,
}

impl DatasetCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `config`, loading it on first use
    pub fn get_or_load(&self, config: &DashboardConfig) -> Result<Arc<ClaimsDataset>> {
        let key = LoadKey::from(config);
        let mut datasets = self
            .datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(dataset) = datasets.get(&key) {
            debug!("Using cached claims data for {}", config.data_path.display());
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(ClaimsDataset::load(config)?);
        datasets.insert(key, Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Number of datasets held
    #[must_use]
    pub fn len(&self) -> usize {
        self.datasets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
