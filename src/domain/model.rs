use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 一批尚未解析的原始資料列
#[derive(Debug, Clone)]
pub struct RawBatch {
    /// 批次抵達順序，從 0 開始
    pub index: usize,
    /// 整張表的欄數，由檔案第一筆可解析的資料列決定
    pub width: usize,
    pub rows: Vec<csv::StringRecord>,
}

impl RawBatch {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentRecord {
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<String>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub weather_condition: Option<String>,
    pub time_of_day: Option<String>,
    pub hour: Option<u32>,
}

impl AccidentRecord {
    /// 座標與時間都存在才算完整
    pub fn is_complete(&self) -> bool {
        self.start_time.is_some() && self.start_lat.is_some() && self.start_lng.is_some()
    }

    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.start_lat?, self.start_lng?))
    }
}

/// Append-only table of every accepted record of a run.
#[derive(Debug, Clone, Default)]
pub struct AccidentTable {
    records: Vec<AccidentRecord>,
}

impl AccidentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[AccidentRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AccidentRecord> {
        self.records.iter()
    }

    pub(crate) fn extend(&mut self, records: Vec<AccidentRecord>) {
        self.records.extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 所有座標的算術平均；空表回傳 None
    pub fn mean_location(&self) -> Option<(f64, f64)> {
        let (count, lat_sum, lng_sum) = self
            .records
            .iter()
            .filter_map(AccidentRecord::location)
            .fold((0usize, 0.0f64, 0.0f64), |(n, lat, lng), (la, ln)| {
                (n + 1, lat + la, lng + ln)
            });

        if count == 0 {
            None
        } else {
            Some((lat_sum / count as f64, lng_sum / count as f64))
        }
    }
}

impl<'a> IntoIterator for &'a AccidentTable {
    type Item = &'a AccidentRecord;
    type IntoIter = std::slice::Iter<'a, AccidentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReporterKind {
    Hour,
    TimeOfDay,
    Weather,
    Heatmap,
}

impl ReporterKind {
    pub const ALL: [ReporterKind; 4] = [
        ReporterKind::Hour,
        ReporterKind::TimeOfDay,
        ReporterKind::Weather,
        ReporterKind::Heatmap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReporterKind::Hour => "hour",
            ReporterKind::TimeOfDay => "time_of_day",
            ReporterKind::Weather => "weather",
            ReporterKind::Heatmap => "heatmap",
        }
    }
}

impl std::fmt::Display for ReporterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReporterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        ReporterKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown reporter '{}', expected one of: hour, time_of_day, weather, heatmap",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub batches_read: usize,
    pub batches_skipped: usize,
    pub rows_read: usize,
    pub rows_accepted: usize,
    pub rows_dropped: usize,
    /// 讀取階段就被略過的列（欄數過多或非 UTF-8）
    pub rows_malformed: usize,
    pub artifacts: Vec<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lat: f64, lng: f64) -> AccidentRecord {
        AccidentRecord {
            start_time: NaiveDateTime::parse_from_str("2016-02-08 05:46:00", "%Y-%m-%d %H:%M:%S")
                .ok(),
            end_time: None,
            start_lat: Some(lat),
            start_lng: Some(lng),
            weather_condition: None,
            time_of_day: None,
            hour: Some(5),
        }
    }

    #[test]
    fn test_mean_location() {
        let mut table = AccidentTable::new();
        assert_eq!(table.mean_location(), None);

        table.extend(vec![record(40.0, -80.0), record(42.0, -84.0)]);
        assert_eq!(table.mean_location(), Some((41.0, -82.0)));
    }

    #[test]
    fn test_reporter_kind_display_matches_parse() {
        for kind in ReporterKind::ALL {
            assert_eq!(kind.to_string().parse::<ReporterKind>(), Ok(kind));
        }
        assert_eq!(ReporterKind::TimeOfDay.to_string(), "time_of_day");
    }

    #[test]
    fn test_is_complete() {
        let mut r = record(1.0, 2.0);
        assert!(r.is_complete());
        r.start_lng = None;
        assert!(!r.is_complete());
        assert_eq!(r.location(), None);
    }
}
