use crate::core::identifier::IdentifierValidator;
use crate::domain::model::SchemaKind;
use crate::utils::error::{ImportError, Result};
use crate::utils::validation::{
    validate_path, validate_positive_number, validate_regex, validate_required_field,
    validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub import: ImportSection,
    /// Replaces the built-in identifier patterns when present.
    pub identifiers: Option<BTreeMap<String, String>>,
    pub registry: RegistryConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSection {
    pub schema: String,
    pub banfile: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryType {
    Http,
    File,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub r#type: RegistryType,
    pub endpoint: Option<String>,
    pub output_path: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

// header 值可能含 token，只印名稱
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names = self
            .headers
            .as_ref()
            .map(|headers| headers.keys().collect::<Vec<_>>());

        f.debug_struct("RegistryConfig")
            .field("type", &self.r#type)
            .field("endpoint", &self.endpoint)
            .field("output_path", &self.output_path)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("headers", &header_names)
            .finish()
    }
}

impl RegistryConfig {
    pub fn http(endpoint: impl Into<String>) -> Self {
        Self {
            r#type: RegistryType::Http,
            endpoint: Some(endpoint.into()),
            output_path: None,
            timeout_seconds: None,
            headers: None,
        }
    }

    pub fn file(output_path: impl Into<String>) -> Self {
        Self {
            r#type: RegistryType::File,
            endpoint: None,
            output_path: Some(output_path.into()),
            timeout_seconds: None,
            headers: None,
        }
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ImportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REGISTRY_TOKEN})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn schema_kind(&self) -> Result<SchemaKind> {
        self.import.schema.parse()
    }

    pub fn banfile(&self) -> &str {
        &self.import.banfile
    }

    pub fn identifier_validator(&self) -> Result<IdentifierValidator> {
        match &self.identifiers {
            Some(patterns) => IdentifierValidator::from_map(patterns),
            None => Ok(IdentifierValidator::default()),
        }
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        self.schema_kind()?;
        validate_path("import.banfile", &self.import.banfile)?;

        match self.registry.r#type {
            RegistryType::Http => {
                let endpoint =
                    validate_required_field("registry.endpoint", &self.registry.endpoint)?;
                validate_url("registry.endpoint", endpoint)?;
            }
            RegistryType::File => {
                let output =
                    validate_required_field("registry.output_path", &self.registry.output_path)?;
                validate_path("registry.output_path", output)?;
            }
        }

        if let Some(timeout) = self.registry.timeout_seconds {
            validate_positive_number("registry.timeout_seconds", timeout, 1)?;
        }

        if let Some(patterns) = &self.identifiers {
            if patterns.is_empty() {
                return Err(ImportError::ConfigValidationError {
                    field: "identifiers".to_string(),
                    message: "at least one identifier pattern is required".to_string(),
                });
            }
            for (kind, pattern) in patterns {
                validate_regex(&format!("identifiers.{}", kind), pattern)?;
            }
        }

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
