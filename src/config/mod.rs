#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, SeedPlan};
use crate::utils::error::{Result, SeederError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_reference_file,
    validate_url,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/";
pub const DEFAULT_REFERENCE_DIR: &str = "./data";
pub const DEFAULT_PLACES_FILE: &str = "places.json";
// 產業標籤預設讀 types.json、類型標籤讀 industries.json (沿用既有資料的對應方式)
pub const DEFAULT_INDUSTRIES_FILE: &str = "types.json";
pub const DEFAULT_KINDS_FILE: &str = "industries.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// 兩種設定來源共用的檢查，在任何 I/O 之前執行
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_url("base_url", config.base_url())?;
    // dry run 不發 HTTP，不需要 token
    if !config.dry_run() {
        validate_non_empty_string("token", config.token())?;
    }

    validate_path("reference_dir", config.reference_dir())?;
    validate_reference_file("places_file", config.places_file())?;
    validate_reference_file("industries_file", config.industries_file())?;
    validate_reference_file("kinds_file", config.kinds_file())?;

    validate_positive_number("batches", config.batches(), 1)?;
    validate_positive_number("devices_per_batch", config.devices_per_batch(), 1)?;
    validate_plan_size(config.batches(), config.devices_per_batch())?;

    if config.dry_run() {
        validate_path("output_path", config.output_path())?;
    }

    Ok(())
}

fn validate_plan_size(batches: usize, devices_per_batch: usize) -> Result<()> {
    match batches.checked_mul(devices_per_batch) {
        Some(total) if total <= SeedPlan::MAX_TOTAL_REQUESTS => Ok(()),
        _ => Err(SeederError::InvalidConfigValueError {
            field: "batches * devices_per_batch".to_string(),
            value: format!("{} * {}", batches, devices_per_batch),
            reason: format!(
                "Total requests must be at most {}",
                SeedPlan::MAX_TOTAL_REQUESTS
            ),
        }),
    }
}
