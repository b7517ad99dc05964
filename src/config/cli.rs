use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::domain::model::ReporterKind;
use crate::domain::schema::SchemaPolicy;
use crate::utils::error::Result;
use crate::utils::validation;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "accident-etl")]
#[command(about = "Analyse a headerless traffic-accident CSV and render charts and a hotspot map")]
pub struct CliConfig {
    /// Path to the accident CSV file (no header row)
    pub input: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the charts and the heatmap are written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Rows per batch
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Field delimiter (single character)
    #[arg(long)]
    pub delimiter: Option<String>,

    /// What to do with batches narrower than the column schema
    #[arg(long, value_enum)]
    pub schema_policy: Option<SchemaPolicy>,

    /// Number of weather conditions in the weather chart
    #[arg(long)]
    pub top_weather: Option<usize>,

    /// Reporters to run: hour, time_of_day, weather, heatmap
    #[arg(long, value_delimiter = ',')]
    pub reporters: Vec<ReporterKind>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,

    /// Log CPU and memory usage after each stage
    #[arg(long)]
    pub monitor: bool,

    /// Read the first batch and check the schema without writing reports
    #[arg(long)]
    pub dry_run: bool,
}

impl CliConfig {
    pub fn load_file_config(&self) -> Result<Option<TomlConfig>> {
        self.config.as_deref().map(TomlConfig::from_file).transpose()
    }

    /// 命令列參數優先，其次是設定檔
    pub fn resolve_input(&self, file: Option<&TomlConfig>) -> Option<String> {
        self.input
            .clone()
            .or_else(|| file.and_then(|f| f.input.path.clone()))
    }

    pub fn into_settings(self, input: String, file: Option<&TomlConfig>) -> Result<Settings> {
        let mut settings = Settings::new(input);
        if let Some(file) = file {
            settings = settings.with_file_config(file)?;
        }

        if let Some(output_path) = self.output_path {
            settings.output_path = output_path;
        }
        if let Some(batch_size) = self.batch_size {
            settings.batch_size = batch_size;
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = validation::validate_delimiter("--delimiter", &delimiter)?;
        }
        if let Some(policy) = self.schema_policy {
            settings.schema_policy = policy;
        }
        if let Some(top) = self.top_weather {
            settings.top_weather = top;
        }
        if !self.reporters.is_empty() {
            settings.reporters = self.reporters;
        }
        settings.monitor |= self.monitor;

        Ok(settings)
    }
}
