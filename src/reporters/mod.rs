pub mod charts;
pub mod counts;
pub mod heatmap;
pub mod palette;

use crate::domain::model::ReporterKind;
use crate::domain::ports::{ConfigProvider, Reporter};

pub use charts::{HourlyChart, TimeOfDayChart, WeatherChart};
pub use heatmap::HotspotHeatmap;

/// 依設定建立報表產生器，順序與設定一致
pub fn build_reporters<C: ConfigProvider>(config: &C) -> Vec<Box<dyn Reporter>> {
    config
        .reporters()
        .iter()
        .map(|kind| -> Box<dyn Reporter> {
            match kind {
                ReporterKind::Hour => Box::new(HourlyChart),
                ReporterKind::TimeOfDay => Box::new(TimeOfDayChart),
                ReporterKind::Weather => Box::new(WeatherChart::new(config.top_weather())),
                ReporterKind::Heatmap => Box::new(HotspotHeatmap::new(
                    config.heatmap_zoom(),
                    config.heatmap_radius(),
                )),
            }
        })
        .collect()
}
