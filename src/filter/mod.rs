//! Filtering of the claims dataset
//!
//! Criteria are applied in a fixed order, each narrowing the result of the
//! previous one: date range, provider, fraud status, claim type.

pub mod core;
pub mod criteria;
pub mod date;
pub mod options;

pub use self::core::{
    AndFilter, ClaimFilter, ClaimTypeFilter, FraudStatusFilter, IncludeAllFilter, ProviderFilter,
    Selection,
};
pub use criteria::{
    ALL_PROVIDERS, FilterCriteria, FilteredClaims, FraudStatusLabel, claim_type_selection,
    provider_selection,
};
pub use date::{DateRange, DateRangeFilter};
pub use options::{DataSummary, FilterOptions};
