use crate::core::generator::DeviceBatch;
use crate::core::{DeviceSink, ReferenceData, RunSummary, SeedPlan};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;
use rand::Rng;

pub struct SeedEngine<K: DeviceSink> {
    sink: K,
    plan: SeedPlan,
    monitor: SystemMonitor,
}

impl<K: DeviceSink> SeedEngine<K> {
    pub fn new(sink: K, plan: SeedPlan) -> Self {
        Self::new_with_monitoring(sink, plan, false)
    }

    pub fn new_with_monitoring(sink: K, plan: SeedPlan, monitor_enabled: bool) -> Self {
        Self {
            sink,
            plan,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn plan(&self) -> SeedPlan {
        self.plan
    }

    /// 依序送出 `batches * devices_per_batch` 筆裝置紀錄。
    ///
    /// 每筆都等待完成才送下一筆。回應狀態只計數，不重試；
    /// 傳輸錯誤會立即中止，已送出的紀錄不會回滾。
    pub async fn run<R: Rng>(&self, reference: &ReferenceData, rng: &mut R) -> Result<RunSummary> {
        let started_at = Utc::now();
        let mut submitted = 0;
        let mut accepted = 0;
        let mut rejected = 0;

        tracing::info!(
            "🚀 Seeding {} devices ({} batches x {} devices)",
            self.plan.total_requests(),
            self.plan.batches,
            self.plan.devices_per_batch
        );
        self.monitor.log_stats("Start");

        for batch_index in 0..self.plan.batches {
            let batch = DeviceBatch::draw(reference, rng)?;
            tracing::debug!(
                "Batch {}/{}: {} / {} / {}",
                batch_index + 1,
                self.plan.batches,
                batch.place.suburb,
                batch.industry,
                batch.kind
            );

            for sequence in 0..self.plan.devices_per_batch {
                let record = batch.device(sequence, rng);

                let outcome = match self.sink.submit(&record).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(
                            "❌ Submitting '{}' failed after {} of {} records: {}",
                            record.name,
                            submitted,
                            self.plan.total_requests(),
                            e
                        );
                        return Err(e);
                    }
                };

                submitted += 1;
                if outcome.is_success() {
                    accepted += 1;
                } else {
                    rejected += 1;
                    tracing::warn!("⚠️ '{}' answered with status {}", record.name, outcome.status);
                }
            }

            if self.monitor.is_enabled() {
                self.monitor
                    .log_stats(&format!("Batch {}/{}", batch_index + 1, self.plan.batches));
            }
        }

        self.sink.finish().await?;
        self.monitor.log_final_stats(submitted);

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            batches: self.plan.batches,
            submitted,
            accepted,
            rejected,
        };

        tracing::info!(
            "✅ Submitted {} devices ({} accepted, {} rejected)",
            summary.submitted,
            summary.accepted,
            summary.rejected
        );

        Ok(summary)
    }
}
