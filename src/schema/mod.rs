//! Column layout of the claims extract.
//!
//! The source file is read by column name, so only the names and the Arrow
//! types the loader casts each column to are fixed here.

pub mod date_utils;

use arrow_schema::{DataType, Field, Schema};

pub use date_utils::{DateFormatConfig, detect_date_format, parse_date_string};

pub const CLAIM_ID: &str = "ClaimID";
pub const PROVIDER: &str = "Provider";
pub const CLAIM_TYPE: &str = "ClaimType";
pub const ATTENDING_DATE: &str = "AttendingDate";
pub const CLAIM_END_DATE: &str = "ClaimEndDate";
pub const REIMBURSED_AMOUNT: &str = "InscClaimAmtReimbursed";
pub const LENGTH_OF_STAY: &str = "LengthOfStay";
pub const GENDER: &str = "Gender";
pub const RACE: &str = "Race";
pub const CHRONIC_CONDITION_LIST: &str = "ChronicConditionList";
pub const CHRONIC_CONDITION_COUNT: &str = "ChronicConditionCount";
pub const POTENTIAL_FRAUD: &str = "PotentialFraud";
pub const CLAIM_YEAR: &str = "ClaimYear";

/// A column the loader reads, with the type it is cast to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimColumn {
    pub name: &'static str,
    pub data_type: ExpectedType,
    pub required: bool,
}

/// Target type of a claim column after casting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedType {
    Utf8,
    Int64,
    Float64,
}

impl ExpectedType {
    #[must_use]
    pub fn data_type(self) -> DataType {
        match self {
            Self::Utf8 => DataType::Utf8,
            Self::Int64 => DataType::Int64,
            Self::Float64 => DataType::Float64,
        }
    }
}

const fn column(name: &'static str, data_type: ExpectedType, required: bool) -> ClaimColumn {
    ClaimColumn {
        name,
        data_type,
        required,
    }
}

/// Every column the loader reads from the claims extract
pub const CLAIM_COLUMNS: [ClaimColumn; 13] = [
    column(CLAIM_ID, ExpectedType::Utf8, true),
    column(PROVIDER, ExpectedType::Utf8, true),
    column(CLAIM_TYPE, ExpectedType::Utf8, true),
    // Dates are kept as text and parsed day-first by the loader
    column(ATTENDING_DATE, ExpectedType::Utf8, true),
    column(CLAIM_END_DATE, ExpectedType::Utf8, true),
    column(REIMBURSED_AMOUNT, ExpectedType::Float64, true),
    column(LENGTH_OF_STAY, ExpectedType::Float64, true),
    column(GENDER, ExpectedType::Int64, true),
    column(RACE, ExpectedType::Int64, true),
    column(CHRONIC_CONDITION_LIST, ExpectedType::Utf8, true),
    column(POTENTIAL_FRAUD, ExpectedType::Utf8, true),
    column(CLAIM_YEAR, ExpectedType::Int64, false),
    column(CHRONIC_CONDITION_COUNT, ExpectedType::Int64, false),
];

/// Names of the columns that must be present in the source file
pub fn required_columns() -> impl Iterator<Item = &'static str> {
    CLAIM_COLUMNS.iter().filter(|c| c.required).map(|c| c.name)
}

/// Arrow schema of the claims extract after casting
#[must_use]
pub fn claims_schema() -> Schema {
    Schema::new(
        CLAIM_COLUMNS
            .iter()
            .map(|c| Field::new(c.name, c.data_type.data_type(), true))
            .collect::<Vec<_>>(),
    )
}

/// Check an inferred file schema for missing required columns
#[must_use]
pub fn missing_required_columns(schema: &Schema) -> Vec<&'static str> {
    required_columns()
        .filter(|name| schema.index_of(name).is_err())
        .collect()
}
