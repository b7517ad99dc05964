use crate::domain::model::RawBatch;
use crate::domain::ports::BatchSource;
use crate::utils::error::{EtlError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// Reads a headerless delimited file as a lazy sequence of [`RawBatch`]es.
///
/// The first decodable row fixes the table width. Wider rows and rows that
/// are not valid UTF-8 are skipped; narrower rows are kept and their missing
/// trailing fields read as empty.
pub struct ChunkedReader<R: Read> {
    records: csv::ByteRecordsIntoIter<R>,
    batch_size: usize,
    width: Option<usize>,
    next_index: usize,
    rows_read: usize,
    rows_skipped: usize,
    finished: bool,
}

impl ChunkedReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P, batch_size: usize, delimiter: u8) -> Result<Self> {
        let path = path.as_ref();
        // 找不到檔案時直接回報，列層級的錯誤才會被略過
        let file = File::open(path).map_err(|e| {
            EtlError::IoError(std::io::Error::new(
                e.kind(),
                format!("{}: {}", path.display(), e),
            ))
        })?;
        Ok(Self::from_reader(BufReader::new(file), batch_size, delimiter))
    }
}

impl<R: Read> ChunkedReader<R> {
    pub fn from_reader(reader: R, batch_size: usize, delimiter: u8) -> Self {
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .from_reader(reader)
            .into_byte_records();

        Self {
            records,
            batch_size: batch_size.max(1),
            width: None,
            next_index: 0,
            rows_read: 0,
            rows_skipped: 0,
            finished: false,
        }
    }

    /// 已接受的資料列數
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    pub fn width(&self) -> Option<usize> {
        self.width
    }

    /// None 代表這一列格式錯誤，應該略過
    fn decode(&mut self, record: csv::ByteRecord) -> Option<csv::StringRecord> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let record = match csv::StringRecord::from_byte_record(record) {
            Ok(record) => record,
            Err(e) => {
                tracing::debug!("Skipping line {}: {}", line, e);
                return None;
            }
        };

        let width = *self.width.get_or_insert(record.len());
        if record.len() > width {
            tracing::debug!(
                "Skipping line {}: expected {} fields, saw {}",
                line,
                width,
                record.len()
            );
            return None;
        }

        Some(record)
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = Result<RawBatch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut rows = Vec::with_capacity(self.batch_size.min(DEFAULT_BATCH_SIZE));

        while rows.len() < self.batch_size {
            match self.records.next() {
                Some(Ok(record)) => match self.decode(record) {
                    Some(row) => rows.push(row),
                    None => self.rows_skipped += 1,
                },
                Some(Err(e)) if e.is_io_error() => {
                    self.finished = true;
                    return Some(Err(EtlError::CsvError(e)));
                }
                Some(Err(e)) => {
                    tracing::debug!("Skipping malformed row: {}", e);
                    self.rows_skipped += 1;
                }
                None => {
                    self.finished = true;
                    break;
                }
            }
        }

        if rows.is_empty() {
            return None;
        }

        self.rows_read += rows.len();
        let batch = RawBatch {
            index: self.next_index,
            width: self.width.unwrap_or(0),
            rows,
        };
        self.next_index += 1;

        tracing::debug!(
            "Read batch {} ({} rows, width {})",
            batch.index,
            batch.len(),
            batch.width
        );
        Some(Ok(batch))
    }
}

impl<R: Read> BatchSource for ChunkedReader<R> {
    fn rows_skipped(&self) -> usize {
        self.rows_skipped
    }
}
