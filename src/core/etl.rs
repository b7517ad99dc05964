use crate::domain::model::{AccidentTable, RunSummary};
use crate::domain::ports::{Accumulator, BatchSource, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// 讀取、投影並累積所有批次
    pub fn accumulate<A: Accumulator>(&self, accumulator: &mut A) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        tracing::info!("📥 Loading data in batches and processing...");
        let mut batches = self.pipeline.extract()?;
        for batch in batches.by_ref() {
            let batch = batch?;
            let rows = batch.len();
            summary.batches_read += 1;
            summary.rows_read += rows;

            match self.pipeline.transform(batch)? {
                Some(records) => {
                    summary.rows_dropped += rows - records.len();
                    accumulator.accept(records)?;
                }
                None => {
                    summary.batches_skipped += 1;
                    summary.rows_dropped += rows;
                }
            }
        }
        summary.rows_malformed = batches.rows_skipped();
        summary.rows_accepted = accumulator.len();

        tracing::info!(
            "✅ Accepted {} of {} rows from {} batches ({} batches skipped, {} malformed rows)",
            summary.rows_accepted,
            summary.rows_read,
            summary.batches_read,
            summary.batches_skipped,
            summary.rows_malformed
        );
        self.monitor.log_stats("Aggregate");

        Ok(summary)
    }

    /// Runs stages 1-3 into an in-memory table.
    pub fn collect(&self) -> Result<(AccidentTable, RunSummary)> {
        let mut table = AccidentTable::new();
        let summary = self.accumulate(&mut table)?;
        Ok((table, summary))
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting accident analysis");
        self.monitor.log_stats("Start");

        let (table, mut summary) = self.collect()?;

        if table.is_empty() {
            tracing::warn!("⚠️ No accident records accepted, reports will be empty");
        }

        tracing::info!("📊 Generating reports...");
        summary.artifacts = self.pipeline.load(&table)?;
        self.monitor.log_stats("Report");
        self.monitor.log_final_stats();

        tracing::info!(
            "✅ Analysis complete, {} artifacts written",
            summary.artifacts.len()
        );
        Ok(summary)
    }
}
