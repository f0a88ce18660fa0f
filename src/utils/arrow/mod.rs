//! Arrow data handling utilities
//!
//! Column lookup, casting and typed value extraction for decoded CSV batches.

pub mod array_utils;
pub mod extractors;

pub use array_utils::{downcast_array, get_column, normalize_batch};
pub use extractors::{
    float64_column, float64_value, int64_column, int64_value, string_column,
    string_value,
};
