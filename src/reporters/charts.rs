use crate::domain::model::AccidentTable;
use crate::domain::ports::Reporter;
use crate::reporters::counts::{self, CategoryCounts};
use crate::reporters::palette;
use crate::utils::error::{EtlError, Result};
use plotters::prelude::*;
use std::path::Path;

pub const HOUR_CHART_FILE: &str = "accidents_by_hour.png";
pub const TIME_OF_DAY_CHART_FILE: &str = "accidents_by_time_of_day.png";
pub const WEATHER_CHART_FILE: &str = "accidents_by_weather.png";
pub const DEFAULT_TOP_WEATHER: usize = 20;

const VERTICAL_SIZE: (u32, u32) = (1000, 600);
const HORIZONTAL_SIZE: (u32, u32) = (1200, 600);

struct ChartLabels<'a> {
    title: &'a str,
    x_desc: &'a str,
    y_desc: &'a str,
}

/// Accidents per hour of day, one bar for each hour 0-23.
#[derive(Debug, Clone, Default)]
pub struct HourlyChart;

impl Reporter for HourlyChart {
    fn name(&self) -> &'static str {
        "hour"
    }

    fn file_name(&self) -> &str {
        HOUR_CHART_FILE
    }

    fn render(&self, table: &AccidentTable, path: &Path) -> Result<()> {
        let counts = counts::count_by_hour(table);
        draw_hourly(path, &counts).map_err(|e| report_error(self.name(), e))
    }
}

#[derive(Debug, Clone, Default)]
pub struct TimeOfDayChart;

impl Reporter for TimeOfDayChart {
    fn name(&self) -> &'static str {
        "time_of_day"
    }

    fn file_name(&self) -> &str {
        TIME_OF_DAY_CHART_FILE
    }

    fn render(&self, table: &AccidentTable, path: &Path) -> Result<()> {
        let counts = counts::count_by_time_of_day(table);
        let labels = ChartLabels {
            title: "Number of Accidents by Time of Day",
            x_desc: "Number of Accidents",
            y_desc: "Time of Day",
        };
        draw_horizontal(path, &counts, &labels, palette::MAGMA)
            .map_err(|e| report_error(self.name(), e))
    }
}

/// Most frequent weather conditions, `top` bars at most.
#[derive(Debug, Clone)]
pub struct WeatherChart {
    top: usize,
}

impl WeatherChart {
    pub fn new(top: usize) -> Self {
        Self { top }
    }
}

impl Default for WeatherChart {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_WEATHER)
    }
}

impl Reporter for WeatherChart {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn file_name(&self) -> &str {
        WEATHER_CHART_FILE
    }

    fn render(&self, table: &AccidentTable, path: &Path) -> Result<()> {
        let counts = counts::count_by_weather(table, self.top);
        let title = format!("Number of Accidents by Weather Condition (Top {})", self.top);
        let labels = ChartLabels {
            title: &title,
            x_desc: "Number of Accidents",
            y_desc: "Weather Condition",
        };
        draw_horizontal(path, &counts, &labels, palette::COOLWARM)
            .map_err(|e| report_error(self.name(), e))
    }
}

fn report_error(reporter: &str, e: anyhow::Error) -> EtlError {
    EtlError::ReportError {
        reporter: reporter.to_string(),
        message: format!("{:#}", e),
    }
}

// 軸上限留一點空間，空表時至少為 1
fn axis_max(max_count: usize) -> u64 {
    let max = max_count as u64;
    (max + max / 10 + 1).max(1)
}

fn draw_hourly(path: &Path, counts: &[usize; 24]) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, VERTICAL_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = axis_max(counts.iter().copied().max().unwrap_or(0));
    let mut chart = ChartBuilder::on(&root)
        .caption("Number of Accidents by Hour of Day", ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d((0u32..24u32).into_segmented(), 0u64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(24)
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(hour) => hour.to_string(),
            _ => String::new(),
        })
        .x_desc("Hour of Day")
        .y_desc("Number of Accidents")
        .draw()?;

    chart.draw_series((0u32..24).map(|hour| {
        let color = palette::pick(palette::VIRIDIS, hour as usize, 24);
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(hour), 0),
                (SegmentValue::Exact(hour + 1), counts[hour as usize] as u64),
            ],
            color.filled(),
        );
        bar.set_margin(0, 0, 4, 4);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// Horizontal count plot; the first category is drawn at the top.
fn draw_horizontal(
    path: &Path,
    counts: &CategoryCounts,
    labels: &ChartLabels<'_>,
    stops: &[(u8, u8, u8)],
) -> anyhow::Result<()> {
    let root = BitMapBackend::new(path, HORIZONTAL_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let rows = counts.len() as u32;
    let x_max = axis_max(counts.iter().map(|(_, c)| *c).max().unwrap_or(0));
    let category_at = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) if *i < rows => counts[(rows - 1 - *i) as usize].0.clone(),
        _ => String::new(),
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(labels.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(200)
        .build_cartesian_2d(0u64..x_max, (0u32..rows.max(1)).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(rows.max(1) as usize)
        .y_label_formatter(&category_at)
        .x_desc(labels.x_desc)
        .y_desc(labels.y_desc)
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, (_, count))| {
        let slot = rows - 1 - i as u32;
        let color = palette::pick(stops, i, counts.len());
        let mut bar = Rectangle::new(
            [
                (0, SegmentValue::Exact(slot)),
                (*count as u64, SegmentValue::Exact(slot + 1)),
            ],
            color.filled(),
        );
        bar.set_margin(3, 3, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}
