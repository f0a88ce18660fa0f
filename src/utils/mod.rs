//! Shared helpers for Arrow batches and calendar periods.

pub mod arrow;
pub mod period;

pub use period::TimePeriod;
