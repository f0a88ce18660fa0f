use std::time::Instant;

use anyhow::Context;
use claims_dash::{DashboardConfig, DashboardSnapshot, DatasetCache, FilterCriteria, FilterOptions};
use log::info;

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DashboardConfig::default();
    let cache = DatasetCache::new();

    let dataset = cache.get_or_load(&config).with_context(|| {
        format!(
            "Failed to load claims data from {}",
            config.data_path.display()
        )
    })?;

    let criteria = FilterCriteria::default();
    let options = FilterOptions::for_criteria(&dataset, &criteria);
    info!(
        "{} providers and {} claim types available for filtering",
        options.providers.len(),
        options.claim_types.len()
    );

    let start = Instant::now();
    let snapshot = DashboardSnapshot::for_criteria(&dataset, &criteria, &config);
    info!(
        "Computed dashboard for {} of {} claims in {:?}",
        snapshot.kpis.total_claims,
        dataset.len(),
        start.elapsed()
    );

    let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize dashboard")?;
    println!("{json}");

    Ok(())
}
