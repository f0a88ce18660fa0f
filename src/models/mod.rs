//! Domain models for claims data.

pub mod claim;
pub mod condition;
pub mod types;

pub use claim::{ClaimRecord, ConditionList, split_condition_list};
pub use condition::{ConditionOccurrence, explode_conditions};
pub use types::{ClaimType, FraudFlag, Gender, Race};
