use crate::core::projector::RowProjector;
use crate::core::reader::ChunkedReader;
use crate::domain::model::{AccidentRecord, AccidentTable, RawBatch};
use crate::domain::ports::{ConfigProvider, Pipeline, Reporter, Storage};
use crate::domain::schema::SchemaPolicy;
use crate::reporters::build_reporters;
use crate::utils::error::{EtlError, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

/// Reads the accident CSV, projects it with the configured schema and hands
/// the table to the configured reporters.
pub struct AccidentPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    projector: RowProjector,
    reporters: Vec<Box<dyn Reporter>>,
}

impl<S: Storage, C: ConfigProvider> AccidentPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let projector = RowProjector::new(*config.schema());
        let reporters = build_reporters(&config);
        Self {
            storage,
            config,
            projector,
            reporters,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 只讀第一批，用來檢查欄數是否符合 schema
    pub fn preview(&self) -> Result<Option<RawBatch>> {
        self.extract()?.next().transpose()
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for AccidentPipeline<S, C> {
    type Batches = ChunkedReader<BufReader<File>>;

    fn extract(&self) -> Result<Self::Batches> {
        tracing::debug!(
            "Opening {} (batch size {})",
            self.config.input_path(),
            self.config.batch_size()
        );
        ChunkedReader::open(
            self.config.input_path(),
            self.config.batch_size(),
            self.config.delimiter(),
        )
    }

    fn transform(&self, batch: RawBatch) -> Result<Option<Vec<AccidentRecord>>> {
        match self.projector.project(&batch) {
            Ok(records) => Ok(Some(records)),
            Err(EtlError::SchemaMismatch {
                batch,
                required,
                actual,
            }) if self.config.schema_policy() == SchemaPolicy::Skip => {
                tracing::warn!(
                    "⚠️ Skipping batch {}: {} columns, schema needs {}",
                    batch,
                    actual,
                    required
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn load(&self, table: &AccidentTable) -> Result<Vec<PathBuf>> {
        let mut artifacts = Vec::with_capacity(self.reporters.len());

        for reporter in &self.reporters {
            tracing::info!("📈 Running {} reporter...", reporter.name());
            let path = self.storage.prepare_path(reporter.file_name())?;
            reporter.render(table, &path)?;
            tracing::info!("💾 Saved {}", path.display());
            artifacts.push(path);
        }

        Ok(artifacts)
    }
}
