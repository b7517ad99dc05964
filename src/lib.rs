pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod reporters;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use adapters::LocalStorage;
pub use config::{toml_config::TomlConfig, Settings};
pub use crate::core::{etl::EtlEngine, pipeline::AccidentPipeline};
pub use domain::model::{AccidentRecord, AccidentTable, ReporterKind, RunSummary};
pub use domain::schema::{RowSchema, SchemaPolicy};
pub use utils::error::{EtlError, Result};
