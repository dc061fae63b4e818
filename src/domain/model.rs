use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 參考地點：裝置會被放在這個座標附近
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub suburb: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// 啟動時載入一次、之後唯讀的三份參考資料
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub places: Vec<Place>,
    pub industries: Vec<String>,
    pub kinds: Vec<String>,
}

/// 送往 `POST /devices/` 的裝置紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub name: String,
    #[serde(rename = "IMEI")]
    pub imei: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedPlan {
    pub batches: usize,
    pub devices_per_batch: usize,
}

impl SeedPlan {
    pub const DEFAULT_BATCHES: usize = 25;
    pub const DEFAULT_DEVICES_PER_BATCH: usize = 10;
    /// 單次播種的請求上限；dry run 會把全部紀錄留在記憶體
    pub const MAX_TOTAL_REQUESTS: usize = 1_000_000;

    pub fn new(batches: usize, devices_per_batch: usize) -> Self {
        Self {
            batches,
            devices_per_batch,
        }
    }

    /// 溢位時回傳 `usize::MAX`
    pub fn total_requests(&self) -> usize {
        self.batches.saturating_mul(self.devices_per_batch)
    }
}

impl Default for SeedPlan {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BATCHES, Self::DEFAULT_DEVICES_PER_BATCH)
    }
}

/// sink 回報的 HTTP 狀態；只記錄，不影響流程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub status: u16,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub batches: usize,
    pub submitted: usize,
    pub accepted: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "devices.csv",
            ExportFormat::Json => "devices.json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unsupported export format: {} (expected csv or json)", other)),
        }
    }
}
