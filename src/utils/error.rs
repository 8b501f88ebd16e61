use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Ban file is not a list of records: {message}")]
    BatchContainerInvalid { message: String },

    #[error("Registry call failed at record {index}: {source}")]
    RegistryCallFailed {
        index: usize,
        #[source]
        source: Box<ImportError>,
    },

    #[error("Registry rejected the action: {message}")]
    RegistryError { message: String },

    #[error("Invalid database type: {value}")]
    InvalidSourceType { value: String },

    #[error("Import source '{kind}' is not supported yet")]
    UnsupportedSource { kind: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Registry,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ImportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ImportError::BatchContainerInvalid { .. }
            | ImportError::SerializationError(_)
            | ImportError::InvalidSourceType { .. }
            | ImportError::UnsupportedSource { .. } => ErrorCategory::Input,
            ImportError::ApiError(_)
            | ImportError::RegistryCallFailed { .. }
            | ImportError::RegistryError { .. } => ErrorCategory::Registry,
            ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ImportError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Registry => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ImportError::BatchContainerInvalid { .. } | ImportError::SerializationError(_) => {
                "確認匯出檔是 JSON 陣列 (check the export file is a JSON array of ban records)"
            }
            ImportError::RegistryCallFailed { .. }
            | ImportError::RegistryError { .. }
            | ImportError::ApiError(_) => {
                "檢查 registry 服務狀態後重新匯入 (check the registry endpoint and re-run; already imported bans are kept)"
            }
            ImportError::InvalidSourceType { .. } => {
                "使用 easyadmin 或 vmenu (use 'easyadmin' or 'vmenu')"
            }
            ImportError::UnsupportedSource { .. } => {
                "請先將資料庫匯出為 JSON (export the database to a JSON file first)"
            }
            ImportError::ConfigValidationError { .. }
            | ImportError::InvalidConfigValueError { .. }
            | ImportError::MissingConfigError { .. } => {
                "檢查設定檔與命令列參數 (check the TOML file and command line flags)"
            }
            ImportError::IoError(_) => "確認檔案路徑與權限 (check file paths and permissions)",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ImportError::RegistryCallFailed { index, .. } => format!(
                "Failed to import bans: registry call failed at record #{}",
                index
            ),
            other => format!("Failed to import bans with error: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
