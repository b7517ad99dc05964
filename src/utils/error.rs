use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Batch {batch} has {actual} columns but the schema requires {required}")]
    SchemaMismatch {
        batch: usize,
        required: usize,
        actual: usize,
    },

    #[error("Reporter '{reporter}' failed: {message}")]
    ReportError { reporter: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Schema,
    Report,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            EtlError::CsvError(_) => ErrorCategory::Input,
            EtlError::SchemaMismatch { .. } => ErrorCategory::Schema,
            EtlError::ReportError { .. } | EtlError::SerializationError(_) => {
                ErrorCategory::Report
            }
            EtlError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 圖表失敗時資料已處理完成，重跑即可
            ErrorCategory::Report => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Schema => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EtlError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                "Check that the input file path exists".to_string()
            }
            EtlError::IoError(_) => {
                "Check file permissions and free disk space in the output directory".to_string()
            }
            EtlError::CsvError(_) => {
                "Verify the input is a delimited text file and the --delimiter option matches"
                    .to_string()
            }
            EtlError::ConfigValidationError { .. } | EtlError::InvalidConfigValueError { .. } => {
                "Fix the configuration file or command line flags and run again".to_string()
            }
            EtlError::SchemaMismatch { required, .. } => format!(
                "The input needs at least {} columns; adjust the [schema] positions or use --schema-policy skip",
                required
            ),
            EtlError::ReportError { .. } | EtlError::SerializationError(_) => {
                "Re-run the analysis; check that fonts are available for chart rendering"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Could not read accident data: {}", self),
            ErrorCategory::Schema => format!("Input does not match the column schema: {}", self),
            ErrorCategory::Report => format!("Could not produce report: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 對應到 CLI 的結束碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
