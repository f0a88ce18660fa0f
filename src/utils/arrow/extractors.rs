//! Field extraction utilities for normalized claim batches
//!
//! Typed column accessors plus per-row readers that turn nulls, blank
//! strings and NaN into `None`.

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::arrow::array_utils::downcast_array;

/// Borrow a Utf8 column of a normalized batch
pub fn string_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a StringArray> {
    typed_column(batch, column_name, &DataType::Utf8)
}

/// Borrow an Int64 column of a normalized batch
pub fn int64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Int64Array> {
    typed_column(batch, column_name, &DataType::Int64)
}

/// Borrow a Float64 column of a normalized batch
pub fn float64_column<'a>(batch: &'a RecordBatch, column_name: &str) -> Result<&'a Float64Array> {
    typed_column(batch, column_name, &DataType::Float64)
}

fn typed_column<'a, A: Array + 'static>(
    batch: &'a RecordBatch,
    column_name: &str,
    data_type: &DataType,
) -> Result<&'a A> {
    let idx = batch.schema().index_of(column_name).map_err(|_| {
        crate::error::DashboardError::ColumnNotFound {
            column: column_name.to_string(),
        }
    })?;
    downcast_array::<A>(batch.column(idx), column_name, data_type)
}

/// Extract a string value, treating null and blank cells as missing
#[must_use]
pub fn string_value(array: &StringArray, row: usize) -> Option<&str> {
    if row >= array.len() || array.is_null(row) {
        return None;
    }
    let value = array.value(row);
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Extract an integer value
#[must_use]
pub fn int64_value(array: &Int64Array, row: usize) -> Option<i64> {
    (row < array.len() && !array.is_null(row)).then(|| array.value(row))
}

/// Extract a float value, treating NaN as missing
#[must_use]
pub fn float64_value(array: &Float64Array, row: usize) -> Option<f64> {
    if row >= array.len() || array.is_null(row) {
        return None;
    }
    let value = array.value(row);
    (!value.is_nan()).then_some(value)
}
