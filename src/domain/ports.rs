use crate::domain::model::{DeviceRecord, ExportFormat, SubmitOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn token(&self) -> &str;
    fn timeout_seconds(&self) -> Option<u64>;

    fn reference_dir(&self) -> &str;
    fn places_file(&self) -> &str;
    fn industries_file(&self) -> &str;
    fn kinds_file(&self) -> &str;

    fn batches(&self) -> usize;
    fn devices_per_batch(&self) -> usize;
    fn seed(&self) -> Option<u64>;

    fn dry_run(&self) -> bool;
    fn output_path(&self) -> &str;
    fn export_format(&self) -> ExportFormat;

    fn monitoring_enabled(&self) -> bool;
}

/// 裝置紀錄的去處 (HTTP API 或 dry-run 匯出)
#[async_trait]
pub trait DeviceSink: Send + Sync {
    async fn submit(&self, record: &DeviceRecord) -> Result<SubmitOutcome>;

    /// 最後一筆送出後呼叫一次
    async fn finish(&self) -> Result<()> {
        Ok(())
    }
}
