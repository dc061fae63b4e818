use crate::config::{
    validate_provider, DEFAULT_INDUSTRIES_FILE, DEFAULT_KINDS_FILE, DEFAULT_OUTPUT_PATH,
    DEFAULT_PLACES_FILE, DEFAULT_REFERENCE_DIR,
};
use crate::core::{ConfigProvider, ExportFormat, SeedPlan};
use crate::utils::error::{Result, SeederError};
use crate::utils::validation::{validate_required_field, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub target: TargetConfig,
    pub reference: Option<ReferenceConfig>,
    pub generation: Option<GenerationConfig>,
    pub export: Option<ExportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceConfig {
    pub dir: Option<String>,
    pub places: Option<String>,
    pub industries: Option<String>,
    pub kinds: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub batches: Option<usize>,
    pub devices_per_batch: Option<usize>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub dry_run: Option<bool>,
    pub output_path: Option<String>,
    pub format: Option<ExportFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SeederError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SeederError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SEEDER_TOKEN})，找不到的保持原樣。
    ///
    /// 代入值會跳脫 `\` 與 `"`，因此 `${VAR}` 須放在雙引號字串或數值位置，
    /// 不能放在單引號 (literal) 字串中。
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SeederError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => escape_basic_string(&value),
                Err(_) => format!("${{{}}}", var_name),
            }
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if !self.dry_run() {
            let token = validate_required_field("target.token", &self.target.token)?;
            if token.contains("${") {
                return Err(SeederError::InvalidConfigValueError {
                    field: "target.token".to_string(),
                    value: token.clone(),
                    reason: "Environment variable is not set".to_string(),
                });
            }
        }

        validate_provider(self)
    }

    /// 命令列覆蓋設定
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.export.get_or_insert_with(Default::default).dry_run = Some(dry_run);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.generation.get_or_insert_with(Default::default).seed = Some(seed);
    }

    pub fn set_monitoring(&mut self, enabled: bool) {
        match &mut self.monitoring {
            Some(monitoring) => monitoring.enabled = enabled,
            None => {
                self.monitoring = Some(MonitoringConfig {
                    enabled,
                    json_logs: None,
                })
            }
        }
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }

    fn reference_field(&self, pick: impl Fn(&ReferenceConfig) -> Option<&String>) -> Option<&str> {
        self.reference.as_ref().and_then(pick).map(String::as_str)
    }
}

fn escape_basic_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

impl ConfigProvider for TomlConfig {
    fn base_url(&self) -> &str {
        &self.target.base_url
    }

    fn token(&self) -> &str {
        self.target.token.as_deref().unwrap_or("")
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.target.timeout_seconds
    }

    fn reference_dir(&self) -> &str {
        self.reference_field(|r| r.dir.as_ref())
            .unwrap_or(DEFAULT_REFERENCE_DIR)
    }

    fn places_file(&self) -> &str {
        self.reference_field(|r| r.places.as_ref())
            .unwrap_or(DEFAULT_PLACES_FILE)
    }

    fn industries_file(&self) -> &str {
        self.reference_field(|r| r.industries.as_ref())
            .unwrap_or(DEFAULT_INDUSTRIES_FILE)
    }

    fn kinds_file(&self) -> &str {
        self.reference_field(|r| r.kinds.as_ref())
            .unwrap_or(DEFAULT_KINDS_FILE)
    }

    fn batches(&self) -> usize {
        self.generation
            .as_ref()
            .and_then(|g| g.batches)
            .unwrap_or(SeedPlan::DEFAULT_BATCHES)
    }

    fn devices_per_batch(&self) -> usize {
        self.generation
            .as_ref()
            .and_then(|g| g.devices_per_batch)
            .unwrap_or(SeedPlan::DEFAULT_DEVICES_PER_BATCH)
    }

    fn seed(&self) -> Option<u64> {
        self.generation.as_ref().and_then(|g| g.seed)
    }

    fn dry_run(&self) -> bool {
        self.export
            .as_ref()
            .and_then(|e| e.dry_run)
            .unwrap_or(false)
    }

    fn output_path(&self) -> &str {
        self.export
            .as_ref()
            .and_then(|e| e.output_path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn export_format(&self) -> ExportFormat {
        self.export
            .as_ref()
            .and_then(|e| e.format)
            .unwrap_or_default()
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
