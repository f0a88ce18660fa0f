//! Loading, filtering and aggregation of healthcare claims for a fraud
//! monitoring dashboard.
//!
//! A [`ClaimsDataset`] is loaded once from the claims CSV (or through a
//! [`DatasetCache`]), narrowed with [`FilterCriteria`] on every interaction,
//! and summarised into a [`DashboardSnapshot`] for the chart renderer.

pub mod analysis;
pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod models;
pub mod schema;
pub mod utils;

// Core types
pub use config::{DashboardConfig, RiskThresholds, TopLimits};
pub use error::{DashboardError, Result};
pub use loader::{ClaimsDataset, DatasetCache, LoadReport};

// Domain models
pub use models::{ClaimRecord, ClaimType, ConditionOccurrence, FraudFlag, Gender, Race};

// Filtering capabilities
pub use filter::{
    DataSummary, DateRange, FilterCriteria, FilterOptions, FilteredClaims, FraudStatusLabel,
    Selection,
};

// Aggregations
pub use analysis::{DashboardSnapshot, Kpis, RiskTier};
