use serde::{Deserialize, Serialize};

/// Column positions of the six accident fields in a headerless row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowSchema {
    pub start_time: usize,
    pub end_time: usize,
    pub start_lat: usize,
    pub start_lng: usize,
    pub weather_condition: usize,
    pub time_of_day: usize,
}

impl Default for RowSchema {
    fn default() -> Self {
        Self {
            start_time: 2,
            end_time: 3,
            start_lat: 4,
            start_lng: 5,
            weather_condition: 27,
            time_of_day: 53,
        }
    }
}

impl RowSchema {
    pub fn positions(&self) -> [usize; 6] {
        [
            self.start_time,
            self.end_time,
            self.start_lat,
            self.start_lng,
            self.weather_condition,
            self.time_of_day,
        ]
    }

    /// 一批資料至少要有的欄數
    pub fn required_width(&self) -> usize {
        self.positions().into_iter().max().unwrap_or(0) + 1
    }

    pub fn fits(&self, width: usize) -> bool {
        width >= self.required_width()
    }
}

/// What the pipeline does with a batch narrower than the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum SchemaPolicy {
    /// 整批略過，不產生任何紀錄
    #[default]
    Skip,
    /// 直接中止整個流程
    Strict,
}

impl std::fmt::Display for SchemaPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaPolicy::Skip => f.write_str("skip"),
            SchemaPolicy::Strict => f.write_str("strict"),
        }
    }
}
