use crate::domain::model::{AccidentRecord, AccidentTable};
use std::collections::HashMap;

/// Bar chart input: labels with their counts, in display order.
pub type CategoryCounts = Vec<(String, usize)>;

/// 每小時事故數，固定 24 格
pub fn count_by_hour(table: &AccidentTable) -> [usize; 24] {
    let mut counts = [0usize; 24];
    for hour in table.iter().filter_map(|r| r.hour) {
        if let Some(slot) = counts.get_mut(hour as usize) {
            *slot += 1;
        }
    }
    counts
}

/// Counts non-null values of `key`, most frequent first; ties by label.
/// `limit` keeps only the leading categories.
pub fn count_by<F>(table: &AccidentTable, key: F, limit: Option<usize>) -> CategoryCounts
where
    F: Fn(&AccidentRecord) -> Option<&str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in table.iter().filter_map(|r| key(r)) {
        *counts.entry(value).or_insert(0) += 1;
    }

    let mut sorted: CategoryCounts = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    if let Some(limit) = limit {
        sorted.truncate(limit);
    }
    sorted
}

pub fn count_by_time_of_day(table: &AccidentTable) -> CategoryCounts {
    count_by(table, |r| r.time_of_day.as_deref(), None)
}

pub fn count_by_weather(table: &AccidentTable, top: usize) -> CategoryCounts {
    count_by(table, |r| r.weather_condition.as_deref(), Some(top))
}
