#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::reader::DEFAULT_BATCH_SIZE;
use crate::domain::model::ReporterKind;
use crate::domain::ports::ConfigProvider;
use crate::domain::schema::{RowSchema, SchemaPolicy};
use crate::reporters::charts::DEFAULT_TOP_WEATHER;
use crate::reporters::heatmap::{DEFAULT_RADIUS, DEFAULT_ZOOM};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use toml_config::TomlConfig;

/// Fully resolved run settings: defaults, then the TOML file, then CLI flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_path: String,
    pub output_path: String,
    pub batch_size: usize,
    pub delimiter: u8,
    pub schema: RowSchema,
    pub schema_policy: SchemaPolicy,
    pub reporters: Vec<ReporterKind>,
    pub top_weather: usize,
    pub heatmap_zoom: u8,
    pub heatmap_radius: u32,
    pub monitor: bool,
}

impl Settings {
    pub fn new(input_path: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: ".".to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            delimiter: b',',
            schema: RowSchema::default(),
            schema_policy: SchemaPolicy::default(),
            reporters: ReporterKind::ALL.to_vec(),
            top_weather: DEFAULT_TOP_WEATHER,
            heatmap_zoom: DEFAULT_ZOOM,
            heatmap_radius: DEFAULT_RADIUS,
            monitor: false,
        }
    }

    /// 以 TOML 檔的值覆蓋預設值
    pub fn with_file_config(mut self, file: &TomlConfig) -> Result<Self> {
        if let Some(batch_size) = file.input.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(delimiter) = &file.input.delimiter {
            self.delimiter = validation::validate_delimiter("input.delimiter", delimiter)?;
        }
        self.schema = file.schema.row_schema();
        if let Some(policy) = file.schema.policy {
            self.schema_policy = policy;
        }
        if let Some(output_path) = &file.output.output_path {
            self.output_path = output_path.clone();
        }
        if let Some(reporters) = &file.report.reporters {
            self.reporters = reporters.clone();
        }
        if let Some(top) = file.report.top_weather {
            self.top_weather = top;
        }
        if let Some(zoom) = file.report.heatmap_zoom {
            self.heatmap_zoom = zoom;
        }
        if let Some(radius) = file.report.heatmap_radius {
            self.heatmap_radius = radius;
        }
        self.monitor = file.monitoring_enabled();
        Ok(self)
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("input_path", &self.input_path)?;
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_positive_number("batch_size", self.batch_size, 1)?;
        validation::validate_positive_number("reporters", self.reporters.len(), 1)?;
        validation::validate_positive_number("top_weather", self.top_weather, 1)?;
        validation::validate_range("heatmap_zoom", self.heatmap_zoom, 0, 18)?;
        validation::validate_range("heatmap_radius", self.heatmap_radius, 1, 100)?;
        Ok(())
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn delimiter(&self) -> u8 {
        self.delimiter
    }

    fn schema(&self) -> &RowSchema {
        &self.schema
    }

    fn schema_policy(&self) -> SchemaPolicy {
        self.schema_policy
    }

    fn reporters(&self) -> &[ReporterKind] {
        &self.reporters
    }

    fn top_weather(&self) -> usize {
        self.top_weather
    }

    fn heatmap_zoom(&self) -> u8 {
        self.heatmap_zoom
    }

    fn heatmap_radius(&self) -> u32 {
        self.heatmap_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_analysis() {
        let settings = Settings::new("accidents.csv");
        assert_eq!(settings.batch_size, 10_000);
        assert_eq!(settings.schema.required_width(), 54);
        assert_eq!(settings.schema_policy, SchemaPolicy::Skip);
        assert_eq!(settings.reporters.len(), 4);
        assert_eq!(settings.top_weather, 20);
        assert_eq!(settings.heatmap_zoom, 6);
        assert_eq!(settings.heatmap_radius, 10);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_file_config_overrides_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[input]
batch_size = 100
delimiter = "|"

[schema]
policy = "strict"

[report]
reporters = ["weather"]
top_weather = 5
"#,
        )
        .unwrap();

        let settings = Settings::new("accidents.csv")
            .with_file_config(&file)
            .unwrap();
        assert_eq!(settings.batch_size, 100);
        assert_eq!(settings.delimiter, b'|');
        assert_eq!(settings.schema_policy, SchemaPolicy::Strict);
        assert_eq!(settings.reporters, vec![ReporterKind::Weather]);
        assert_eq!(settings.top_weather, 5);
        assert_eq!(settings.output_path, ".");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut settings = Settings::new("accidents.csv");
        settings.batch_size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::new("  ");
        settings.batch_size = 10;
        assert!(settings.validate().is_err());

        let mut settings = Settings::new("accidents.csv");
        settings.heatmap_zoom = 30;
        assert!(settings.validate().is_err());

        let mut settings = Settings::new("accidents.csv");
        settings.reporters.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_bad_delimiter_in_file_config() {
        let file = TomlConfig::from_toml_str("[input]\ndelimiter = \"::\"\n").unwrap();
        assert!(Settings::new("a.csv").with_file_config(&file).is_err());
    }
}
