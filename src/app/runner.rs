use crate::adapters::{ExportSink, HttpDeviceSink, LocalStorage};
use crate::core::engine::SeedEngine;
use crate::core::{ConfigProvider, ReferenceData, RunSummary, SeedPlan};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// 依設定載入參考資料、建立 sink 並執行一次完整播種。
///
/// 設定須先經過 `Validate`；參考資料任何問題都會在送出第一筆之前失敗。
pub async fn run<C: ConfigProvider>(config: &C) -> Result<RunSummary> {
    let reference_storage = LocalStorage::new(config.reference_dir());
    let reference = ReferenceData::load(
        &reference_storage,
        config.places_file(),
        config.industries_file(),
        config.kinds_file(),
    )
    .await?;

    let plan = SeedPlan::new(config.batches(), config.devices_per_batch());
    let mut rng = match config.seed() {
        Some(seed) => {
            tracing::info!("🎲 Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    if config.dry_run() {
        tracing::info!(
            "🔍 DRY RUN - writing {} devices to {}",
            plan.total_requests(),
            config.output_path()
        );
        let sink = ExportSink::new(
            LocalStorage::new(config.output_path()),
            config.export_format(),
        );
        let engine = SeedEngine::new_with_monitoring(sink, plan, config.monitoring_enabled());
        return engine.run(&reference, &mut rng).await;
    }

    let sink = HttpDeviceSink::new(
        config.base_url(),
        config.token(),
        config.timeout_seconds().map(Duration::from_secs),
    )?;
    tracing::info!("📡 Posting devices to {}", sink.endpoint());

    let engine = SeedEngine::new_with_monitoring(sink, plan, config.monitoring_enabled());
    engine.run(&reference, &mut rng).await
}

/// 給使用者看的完成訊息；dry run 不會送出任何請求，只列出匯出位置
pub fn completion_message<C: ConfigProvider>(config: &C, summary: &RunSummary) -> String {
    if config.dry_run() {
        format!(
            "✅ Generated {} devices into {}/{} (nothing was sent)",
            summary.submitted,
            config.output_path(),
            config.export_format().file_name()
        )
    } else {
        format!(
            "✅ Submitted {} devices ({} accepted, {} rejected)",
            summary.submitted, summary.accepted, summary.rejected
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use chrono::Utc;

    fn summary() -> RunSummary {
        RunSummary {
            started_at: Utc::now(),
            finished_at: Utc::now(),
            batches: 25,
            submitted: 250,
            accepted: 250,
            rejected: 0,
        }
    }

    #[test]
    fn test_dry_run_message_names_export_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
base_url = "http://localhost:3001/api/"

[export]
dry_run = true
output_path = "./out"
format = "json"
"#,
        )
        .unwrap();

        let message = completion_message(&config, &summary());
        assert_eq!(
            message,
            "✅ Generated 250 devices into ./out/devices.json (nothing was sent)"
        );
        assert!(!message.contains("Submitted"));
    }

    #[test]
    fn test_http_message_reports_counts() {
        let config = TomlConfig::from_toml_str(
            r#"
[target]
base_url = "http://localhost:3001/api/"
token = "abc"
"#,
        )
        .unwrap();

        assert_eq!(
            completion_message(&config, &summary()),
            "✅ Submitted 250 devices (250 accepted, 0 rejected)"
        );
    }
}
