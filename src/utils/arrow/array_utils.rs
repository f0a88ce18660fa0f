//! Utilities for working with Arrow arrays.
//!
//! Columns are looked up by name and cast to the type the loader expects,
//! so the column order and the inferred types of the source file do not
//! matter.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, new_null_array};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;
use log::{debug, warn};

use crate::error::{DashboardError, Result};
use crate::schema::{CLAIM_COLUMNS, claims_schema};

/// Get a column from a record batch, cast to the expected data type
///
/// # Arguments
///
/// * `batch` - The record batch containing the column
/// * `column_name` - The name of the column to extract
/// * `expected_type` - The expected data type for the column
/// * `required` - Whether the column is required (error if missing) or optional (None if missing)
///
/// # Returns
///
/// * `Ok(Some(ArrayRef))` - The column array (converted if necessary) if found
/// * `Ok(None)` - If the column is not found and `required` is false
/// * `Err` - If the column is missing and required, or cannot be cast
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
    required: bool,
) -> Result<Option<ArrayRef>> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        if required {
            return Err(DashboardError::ColumnNotFound {
                column: column_name.to_string(),
            });
        }
        return Ok(None);
    };

    let column = batch.column(idx);
    let actual_type = column.data_type();

    if actual_type == expected_type {
        return Ok(Some(column.clone()));
    }

    // Cells that do not convert become null
    debug!("Casting column '{column_name}' from {actual_type:?} to {expected_type:?}");
    match cast(column.as_ref(), expected_type) {
        Ok(converted) => Ok(Some(converted)),
        Err(err) => {
            warn!("Failed to cast column '{column_name}' to {expected_type:?}: {err}");
            Err(DashboardError::TypeMismatch {
                column: column_name.to_string(),
                expected: expected_type.clone(),
                actual: actual_type.clone(),
            })
        }
    }
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type: &DataType,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| DashboardError::TypeMismatch {
            column: column_name.to_string(),
            expected: expected_type.clone(),
            actual: array.data_type().clone(),
        })
}

/// Project a decoded batch onto the claims schema
///
/// Every claim column is cast to its expected type; optional columns absent
/// from the file are filled with nulls. Columns outside the claims schema are
/// dropped.
pub fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let columns = CLAIM_COLUMNS
        .iter()
        .map(|column| {
            let data_type = column.data_type.data_type();
            let array = get_column(batch, column.name, &data_type, column.required)?;
            Ok(array.unwrap_or_else(|| new_null_array(&data_type, batch.num_rows())))
        })
        .collect::<Result<Vec<ArrayRef>>>()?;

    Ok(RecordBatch::try_new(Arc::new(claims_schema()), columns)?)
}
