use crate::config::{
    validate_provider, DEFAULT_BASE_URL, DEFAULT_INDUSTRIES_FILE, DEFAULT_KINDS_FILE,
    DEFAULT_OUTPUT_PATH, DEFAULT_PLACES_FILE, DEFAULT_REFERENCE_DIR,
};
use crate::core::{ConfigProvider, ExportFormat, SeedPlan};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "device-seeder")]
#[command(about = "Seed a device API with randomized fixture records")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(long, default_value = "", help = "Bearer token sent with every request (not needed for --dry-run)")]
    pub token: String,

    #[arg(long, help = "Per-request timeout (no timeout when unset)")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, default_value = DEFAULT_REFERENCE_DIR)]
    pub reference_dir: String,

    #[arg(long, default_value = DEFAULT_PLACES_FILE)]
    pub places_file: String,

    #[arg(long, default_value = DEFAULT_INDUSTRIES_FILE)]
    pub industries_file: String,

    #[arg(long, default_value = DEFAULT_KINDS_FILE)]
    pub kinds_file: String,

    #[arg(long, default_value_t = SeedPlan::DEFAULT_BATCHES)]
    pub batches: usize,

    #[arg(long, default_value_t = SeedPlan::DEFAULT_DEVICES_PER_BATCH)]
    pub devices_per_batch: usize,

    #[arg(long, help = "Seed the RNG for reproducible fixtures")]
    pub seed: Option<u64>,

    #[arg(long, help = "Write the generated devices to --output-path instead of POSTing them")]
    pub dry_run: bool,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output_path: String,

    #[arg(long, default_value = "csv")]
    pub export_format: ExportFormat,

    #[arg(long, help = "Log process CPU/memory while seeding")]
    pub monitor: bool,

    #[arg(long, help = "Emit JSON log lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn reference_dir(&self) -> &str {
        &self.reference_dir
    }

    fn places_file(&self) -> &str {
        &self.places_file
    }

    fn industries_file(&self) -> &str {
        &self.industries_file
    }

    fn kinds_file(&self) -> &str {
        &self.kinds_file
    }

    fn batches(&self) -> usize {
        self.batches
    }

    fn devices_per_batch(&self) -> usize {
        self.devices_per_batch
    }

    fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SeederError;

    #[test]
    fn test_defaults() {
        let config = CliConfig::try_parse_from(["device-seeder", "--token", "abc"]).unwrap();

        assert_eq!(config.base_url(), "http://localhost:3001/api/");
        assert_eq!(config.reference_dir(), "./data");
        assert_eq!(config.industries_file(), "types.json");
        assert_eq!(config.kinds_file(), "industries.json");
        assert_eq!(config.batches(), 25);
        assert_eq!(config.devices_per_batch(), 10);
        assert_eq!(config.export_format(), ExportFormat::Csv);
        assert!(config.seed().is_none());
        assert!(!config.dry_run());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_token_is_required_for_http() {
        let config = CliConfig::try_parse_from(["device-seeder"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_and_validation() {
        let config = CliConfig::try_parse_from([
            "device-seeder",
            "--token",
            "abc",
            "--batches",
            "0",
            "--export-format",
            "json",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(config.export_format(), ExportFormat::Json);
        assert_eq!(config.seed(), Some(42));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_plan_that_overflows() {
        let batches = usize::MAX.to_string();
        let config = CliConfig::try_parse_from([
            "device-seeder",
            "--token",
            "abc",
            "--batches",
            batches.as_str(),
            "--devices-per-batch",
            "2",
            "--dry-run",
        ])
        .unwrap();

        assert!(matches!(
            config.validate(),
            Err(SeederError::InvalidConfigValueError { ref field, .. })
                if field == "batches * devices_per_batch"
        ));
    }

    #[test]
    fn test_rejects_plan_above_request_cap() {
        let config = CliConfig::try_parse_from([
            "device-seeder",
            "--token",
            "abc",
            "--batches",
            "1000001",
            "--devices-per-batch",
            "1",
        ])
        .unwrap();
        assert!(config.validate().is_err());

        let config = CliConfig::try_parse_from([
            "device-seeder",
            "--token",
            "abc",
            "--batches",
            "1000",
            "--devices-per-batch",
            "1000",
        ])
        .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dry_run_does_not_need_a_token() {
        let config = CliConfig::try_parse_from(["device-seeder", "--dry-run"]).unwrap();
        assert!(config.validate().is_ok());

        let config = CliConfig::try_parse_from(["device-seeder", "--token", ""]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_non_json_reference_file() {
        let config = CliConfig::try_parse_from([
            "device-seeder",
            "--token",
            "abc",
            "--places-file",
            "places.csv",
        ])
        .unwrap();

        assert!(config.validate().is_err());
    }
}
