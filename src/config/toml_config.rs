use crate::domain::model::ReporterKind;
use crate::domain::schema::{RowSchema, SchemaPolicy};
use crate::utils::error::{EtlError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub schema: SchemaConfig,
    pub output: OutputConfig,
    pub report: ReportConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: Option<String>,
    pub batch_size: Option<usize>,
    pub delimiter: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaConfig {
    pub start_time: Option<usize>,
    pub end_time: Option<usize>,
    pub start_lat: Option<usize>,
    pub start_lng: Option<usize>,
    pub weather_condition: Option<usize>,
    pub time_of_day: Option<usize>,
    pub policy: Option<SchemaPolicy>,
}

impl SchemaConfig {
    /// 未指定的欄位沿用預設位置
    pub fn row_schema(&self) -> RowSchema {
        let defaults = RowSchema::default();
        RowSchema {
            start_time: self.start_time.unwrap_or(defaults.start_time),
            end_time: self.end_time.unwrap_or(defaults.end_time),
            start_lat: self.start_lat.unwrap_or(defaults.start_lat),
            start_lng: self.start_lng.unwrap_or(defaults.start_lng),
            weather_condition: self
                .weather_condition
                .unwrap_or(defaults.weather_condition),
            time_of_day: self.time_of_day.unwrap_or(defaults.time_of_day),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    pub reporters: Option<Vec<ReporterKind>>,
    pub top_weather: Option<usize>,
    pub heatmap_zoom: Option<u8>,
    pub heatmap_radius: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${OUTPUT_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR
            .get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[input]
batch_size = 500
delimiter = ";"

[schema]
start_time = 0
end_time = 1
start_lat = 2
start_lng = 3
weather_condition = 4
time_of_day = 5
policy = "strict"

[output]
output_path = "./reports"

[report]
reporters = ["hour", "heatmap"]
top_weather = 10
heatmap_zoom = 8
heatmap_radius = 12

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.input.batch_size, Some(500));
        assert_eq!(config.input.delimiter.as_deref(), Some(";"));
        assert_eq!(config.schema.row_schema().required_width(), 6);
        assert_eq!(config.schema.policy, Some(SchemaPolicy::Strict));
        assert_eq!(config.output.output_path.as_deref(), Some("./reports"));
        assert_eq!(
            config.report.reporters,
            Some(vec![ReporterKind::Hour, ReporterKind::Heatmap])
        );
        assert_eq!(config.report.heatmap_zoom, Some(8));
        assert!(config.monitoring_enabled());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.input.batch_size.is_none());
        assert!(config.schema.policy.is_none());
        assert_eq!(config.schema.row_schema(), RowSchema::default());
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_partial_schema_fills_default_positions() {
        let config = TomlConfig::from_toml_str("[schema]\ntime_of_day = 60\n").unwrap();
        let schema = config.schema.row_schema();
        assert_eq!(schema.start_time, 2);
        assert_eq!(schema.required_width(), 61);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ACCIDENT_ETL_TEST_OUTPUT", "/tmp/accident-reports");

        let toml_content = r#"
[output]
output_path = "${ACCIDENT_ETL_TEST_OUTPUT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.output.output_path.as_deref(),
            Some("/tmp/accident-reports")
        );

        std::env::remove_var("ACCIDENT_ETL_TEST_OUTPUT");
    }

    #[test]
    fn test_unknown_reporter_is_rejected() {
        let result = TomlConfig::from_toml_str("[report]\nreporters = [\"pie\"]\n");
        assert!(matches!(
            result,
            Err(EtlError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[input]\nbatch_size = 42\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input.batch_size, Some(42));
    }
}
