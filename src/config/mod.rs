//! Configuration for loading and summarising the claims dataset.

use std::path::PathBuf;

use crate::error::{DashboardError, Result};
use crate::schema::DateFormatConfig;

/// Default location of the claims extract, relative to the working directory
pub const DEFAULT_DATA_PATH: &str = "healthcare_fraud_claims_clean.csv";

/// Row limits for every ranked table on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopLimits {
    /// Rows in the (provider, fraud status) mean amount table
    pub provider_mean_amount: usize,
    /// Providers in the claim-type mix chart
    pub provider_claim_mix: usize,
    /// Providers in the risk assessment panel
    pub risk_panel: usize,
    /// Conditions in the frequency ranking
    pub conditions: usize,
    /// Conditions in the fraud rate ranking
    pub condition_fraud_rates: usize,
}

impl Default for TopLimits {
    fn default() -> Self {
        Self {
            provider_mean_amount: 15,
            provider_claim_mix: 10,
            risk_panel: 15,
            conditions: 10,
            condition_fraud_rates: 15,
        }
    }
}

/// Fraud rate cut-offs (in percent) used to tier providers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskThresholds {
    /// Rates strictly above this are high risk
    pub high: f64,
    /// Rates strictly above this (and not high) are medium risk
    pub medium: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            high: 30.0,
            medium: 15.0,
        }
    }
}

/// Configuration for the dashboard data pipeline
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Path to the delimited claims file
    pub data_path: PathBuf,
    /// Rows per decoded record batch
    pub batch_size: usize,
    /// Rows scanned for schema inference (`None` scans the whole file)
    pub schema_inference_records: Option<usize>,
    /// Date format configuration for the day-first date columns
    pub date_format_config: DateFormatConfig,
    /// Top-N sizes for ranked tables
    pub limits: TopLimits,
    /// Provider risk tier boundaries
    pub risk_thresholds: RiskThresholds,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            batch_size: 8192,
            schema_inference_records: None,
            date_format_config: DateFormatConfig::default(),
            limits: TopLimits::default(),
            risk_thresholds: RiskThresholds::default(),
        }
    }
}

impl DashboardConfig {
    /// Default configuration reading from `data_path`
    #[must_use]
    pub fn with_data_path(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    /// Reject settings the loader cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(DashboardError::Config(
                "batch_size must be greater than zero".to_string(),
            ));
        }
        if self.risk_thresholds.medium > self.risk_thresholds.high {
            return Err(DashboardError::Config(format!(
                "medium risk threshold ({}) exceeds high risk threshold ({})",
                self.risk_thresholds.medium, self.risk_thresholds.high
            )));
        }
        if self.date_format_config.date_formats.is_empty()
            && !self.date_format_config.enable_format_detection
        {
            return Err(DashboardError::Config(
                "no date formats configured and format detection disabled".to_string(),
            ));
        }
        Ok(())
    }
}
