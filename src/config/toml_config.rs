use crate::config::{StorageBackend, LOG_LEVELS};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ACADEMY_NAME: &str = "Academia Sin Fronteras";
pub const DEFAULT_DATA_DIR: &str = "datos_academia";
pub const DEFAULT_DATABASE_PATH: &str = "datos_academia/data.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub academy: AcademyConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcademyConfig {
    #[serde(default = "default_academy_name")]
    pub name: String,
}

impl Default for AcademyConfig {
    fn default() -> Self {
        Self {
            name: default_academy_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            database_path: default_database_path(),
            data_dir: default_data_dir(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    #[serde(default)]
    pub json: bool,
}

fn default_academy_name() -> String {
    DEFAULT_ACADEMY_NAME.to_string()
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {e}"))
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("academy.name", &self.academy.name)?;
        match self.storage.backend {
            StorageBackend::Sqlite => {
                validate_path("storage.database_path", &self.storage.database_path)?
            }
            StorageBackend::Json => validate_path("storage.data_dir", &self.storage.data_dir)?,
        }
        if let Some(level) = &self.logging.level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
