use crate::core::{DeviceRecord, DeviceSink, ExportFormat, Storage, SubmitOutcome};
use crate::utils::error::{Result, SeederError};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Dry-run 用的 sink：不發 HTTP，收集紀錄後一次寫成 CSV 或 JSON
pub struct ExportSink<S: Storage> {
    storage: S,
    format: ExportFormat,
    records: Mutex<Vec<DeviceRecord>>,
}

impl<S: Storage> ExportSink<S> {
    pub fn new(storage: S, format: ExportFormat) -> Self {
        Self {
            storage,
            format,
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn file_name(&self) -> &'static str {
        self.format.file_name()
    }

    pub async fn buffered(&self) -> usize {
        self.records.lock().await.len()
    }
}

pub fn encode_records(records: &[DeviceRecord], format: ExportFormat) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_vec_pretty(records)?),
        ExportFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for record in records {
                writer.serialize(record)?;
            }
            writer
                .into_inner()
                .map_err(|e| SeederError::IoError(e.into_error()))
        }
    }
}

#[async_trait]
impl<S: Storage> DeviceSink for ExportSink<S> {
    async fn submit(&self, record: &DeviceRecord) -> Result<SubmitOutcome> {
        self.records.lock().await.push(record.clone());
        Ok(SubmitOutcome { status: 200 })
    }

    async fn finish(&self) -> Result<()> {
        let records = self.records.lock().await;
        let data = encode_records(&records, self.format)?;

        tracing::info!(
            "💾 Writing {} devices to {} ({} bytes)",
            records.len(),
            self.file_name(),
            data.len()
        );
        self.storage.write_file(self.file_name(), &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::LocalStorage;
    use tempfile::TempDir;

    fn records() -> Vec<DeviceRecord> {
        (0..3)
            .map(|i| DeviceRecord {
                name: format!("Glenelg Retail Gateway {}", i),
                imei: format!("{}", 100 + i),
                latitude: -34.98,
                longitude: 138.51,
            })
            .collect()
    }

    #[test]
    fn test_encode_csv_uses_wire_field_names() {
        let data = encode_records(&records(), ExportFormat::Csv).unwrap();
        let text = String::from_utf8(data).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "name,IMEI,latitude,longitude");
        assert_eq!(lines[1], "Glenelg Retail Gateway 0,100,-34.98,138.51");
    }

    #[test]
    fn test_encode_json_array() {
        let data = encode_records(&records(), ExportFormat::Json).unwrap();
        let parsed: Vec<DeviceRecord> = serde_json::from_slice(&data).unwrap();
        assert_eq!(parsed, records());
    }

    #[tokio::test]
    async fn test_finish_writes_export_file() {
        let temp_dir = TempDir::new().unwrap();
        let sink = ExportSink::new(LocalStorage::new(temp_dir.path()), ExportFormat::Json);

        for record in records() {
            let outcome = sink.submit(&record).await.unwrap();
            assert_eq!(outcome.status, 200);
        }
        assert_eq!(sink.buffered().await, 3);
        sink.finish().await.unwrap();

        let written = std::fs::read(temp_dir.path().join("devices.json")).unwrap();
        let parsed: Vec<DeviceRecord> = serde_json::from_slice(&written).unwrap();
        assert_eq!(parsed.len(), 3);
    }
}
