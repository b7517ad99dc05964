use crate::domain::model::{AccidentRecord, AccidentTable, RawBatch, ReporterKind};
use crate::domain::schema::{RowSchema, SchemaPolicy};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

pub trait Storage {
    /// 回傳輸出檔的完整路徑，並確保上層目錄存在
    fn prepare_path(&self, path: &str) -> Result<PathBuf>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn delimiter(&self) -> u8;
    fn schema(&self) -> &RowSchema;
    fn schema_policy(&self) -> SchemaPolicy;
    fn reporters(&self) -> &[ReporterKind];
    fn top_weather(&self) -> usize;
    fn heatmap_zoom(&self) -> u8;
    fn heatmap_radius(&self) -> u32;
}

/// Collects projected records. The in-memory [`AccidentTable`] is the only
/// implementation today; a streaming one would forward records to reporters.
pub trait Accumulator {
    fn accept(&mut self, records: Vec<AccidentRecord>) -> Result<()>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait Reporter {
    fn name(&self) -> &'static str;
    fn file_name(&self) -> &str;
    fn render(&self, table: &AccidentTable, path: &Path) -> Result<()>;
}

/// 批次來源，讀完後可查詢因格式錯誤被略過的列數
pub trait BatchSource: Iterator<Item = Result<RawBatch>> {
    fn rows_skipped(&self) -> usize;
}

pub trait Pipeline {
    type Batches: BatchSource;

    fn extract(&self) -> Result<Self::Batches>;
    /// `None` means the whole batch was skipped.
    fn transform(&self, batch: RawBatch) -> Result<Option<Vec<AccidentRecord>>>;
    fn load(&self, table: &AccidentTable) -> Result<Vec<PathBuf>>;
}
