use std::fs;
use std::sync::Arc;

use claims_dash::{DashboardConfig, DatasetCache, Result, TopLimits};

use crate::utils::{FULL_HEADER, SAMPLE_ROWS, sample_claims_file, write_csv};

#[test]
fn test_same_path_is_parsed_once() -> Result<()> {
    let (_dir, path) = sample_claims_file();
    let config = DashboardConfig::with_data_path(&path);
    let cache = DatasetCache::new();
    assert!(cache.is_empty());

    let first = cache.get_or_load(&config)?;

    // A second request must not touch the file again
    fs::remove_file(&path).unwrap();
    let second = cache.get_or_load(&config)?;

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.len(), 5);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[test]
fn test_distinct_paths_are_cached_separately() -> Result<()> {
    let (dir, first_path) = sample_claims_file();
    let second_path = write_csv(dir.path(), "subset.csv", FULL_HEADER, &SAMPLE_ROWS[..2]);
    let cache = DatasetCache::new();

    let first = cache.get_or_load(&DashboardConfig::with_data_path(first_path))?;
    let second = cache.get_or_load(&DashboardConfig::with_data_path(second_path))?;

    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 2);
    assert_eq!(cache.len(), 2);
    Ok(())
}

#[test]
fn test_parsing_settings_are_part_of_the_key() -> Result<()> {
    let (_dir, path) = sample_claims_file();
    let config = DashboardConfig::with_data_path(&path);
    let cache = DatasetCache::new();

    let first = cache.get_or_load(&config)?;
    let batched = cache.get_or_load(&DashboardConfig {
        batch_size: 2,
        ..config.clone()
    })?;
    assert!(!Arc::ptr_eq(&first, &batched));
    assert_eq!(batched.report().batches, 3);
    assert_eq!(cache.len(), 2);

    let mut month_first = config.clone();
    month_first.date_format_config.date_formats = vec!["%m/%d/%Y".to_string()];
    month_first.date_format_config.enable_format_detection = false;
    let reparsed = cache.get_or_load(&month_first)?;
    assert_ne!(reparsed.claims(), first.claims());
    assert_eq!(cache.len(), 3);

    // Aggregation settings reuse the parsed dataset
    let limited = DashboardConfig {
        limits: TopLimits {
            conditions: 3,
            ..TopLimits::default()
        },
        ..config
    };
    assert!(Arc::ptr_eq(&first, &cache.get_or_load(&limited)?));
    assert_eq!(cache.len(), 3);
    Ok(())
}

#[test]
fn test_failed_load_is_not_cached() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig::with_data_path(dir.path().join("missing.csv"));
    let cache = DatasetCache::new();

    assert!(cache.get_or_load(&config).is_err());
    assert!(cache.is_empty());
}
