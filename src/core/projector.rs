use crate::core::timestamp::parse_timestamp;
use crate::domain::model::{AccidentRecord, RawBatch};
use crate::domain::schema::RowSchema;
use crate::utils::error::{EtlError, Result};
use chrono::Timelike;

/// Turns raw batches into accident records according to a [`RowSchema`].
#[derive(Debug, Clone, Default)]
pub struct RowProjector {
    schema: RowSchema,
}

impl RowProjector {
    pub fn new(schema: RowSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &RowSchema {
        &self.schema
    }

    /// 投影一整批資料；欄數不足時回傳 `SchemaMismatch`
    pub fn project(&self, batch: &RawBatch) -> Result<Vec<AccidentRecord>> {
        let required = self.schema.required_width();
        if batch.width < required {
            return Err(EtlError::SchemaMismatch {
                batch: batch.index,
                required,
                actual: batch.width,
            });
        }

        let records: Vec<AccidentRecord> = batch
            .rows
            .iter()
            .map(|row| self.project_row(row))
            .filter(AccidentRecord::is_complete)
            .collect();

        tracing::debug!(
            "Batch {}: kept {} of {} rows",
            batch.index,
            records.len(),
            batch.len()
        );
        Ok(records)
    }

    /// Projects a single row without dropping incomplete records.
    pub fn project_row(&self, row: &csv::StringRecord) -> AccidentRecord {
        let start_time = field(row, self.schema.start_time).and_then(parse_timestamp);

        AccidentRecord {
            start_time,
            end_time: text(row, self.schema.end_time),
            start_lat: coordinate(row, self.schema.start_lat),
            start_lng: coordinate(row, self.schema.start_lng),
            weather_condition: text(row, self.schema.weather_condition),
            time_of_day: text(row, self.schema.time_of_day),
            hour: start_time.map(|t| t.hour()),
        }
    }
}

fn field(row: &csv::StringRecord, position: usize) -> Option<&str> {
    row.get(position)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn text(row: &csv::StringRecord, position: usize) -> Option<String> {
    field(row, position).map(str::to_string)
}

// "NaN"、"inf" 也能被 f64 解析，一律視為缺值
fn coordinate(row: &csv::StringRecord, position: usize) -> Option<f64> {
    field(row, position)
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}
