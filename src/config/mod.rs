#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::fmt;
use toml_config::TomlConfig;

/// `[logging] level` 可接受的值，直接交給 EnvFilter
pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// 網頁版使用的 SQLite 資料庫
    #[default]
    Sqlite,
    /// 桌面版使用的 JSON 文件
    Json,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => f.write_str("sqlite"),
            StorageBackend::Json => f.write_str("json"),
        }
    }
}

/// 合併設定檔與命令列後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub academy_name: String,
    pub backend: StorageBackend,
    pub database_path: String,
    pub data_dir: String,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            academy_name: config.academy.name.clone(),
            backend: config.storage.backend,
            database_path: config.storage.database_path.clone(),
            data_dir: config.storage.data_dir.clone(),
            log_level: config.logging.level.clone(),
            log_json: config.logging.json,
        }
    }

    /// 命令列的值（有給的話）覆蓋設定檔
    pub fn with_overrides(
        mut self,
        backend: Option<StorageBackend>,
        database_path: Option<String>,
        data_dir: Option<String>,
    ) -> Self {
        if let Some(backend) = backend {
            self.backend = backend;
        }
        if let Some(path) = database_path {
            self.database_path = path;
        }
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl ConfigProvider for Settings {
    fn academy_name(&self) -> &str {
        &self.academy_name
    }

    fn backend(&self) -> StorageBackend {
        self.backend
    }

    fn database_path(&self) -> &str {
        &self.database_path
    }

    fn data_dir(&self) -> &str {
        &self.data_dir
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("academy_name", &self.academy_name)?;
        match self.backend {
            StorageBackend::Sqlite => validate_path("database_path", &self.database_path)?,
            StorageBackend::Json => validate_path("data_dir", &self.data_dir)?,
        }
        if let Some(level) = &self.log_level {
            validate_one_of("log_level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_file_values() {
        let settings = Settings::default().with_overrides(
            Some(StorageBackend::Json),
            None,
            Some("/tmp/datos".to_string()),
        );

        assert_eq!(settings.backend(), StorageBackend::Json);
        assert_eq!(settings.data_dir(), "/tmp/datos");
        assert_eq!(settings.database_path(), toml_config::DEFAULT_DATABASE_PATH);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_blank_database_path_is_invalid_for_sqlite() {
        let settings = Settings::default().with_overrides(None, Some(" ".to_string()), None);
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_unknown_log_level_is_invalid() {
        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        let err = Settings::from_toml(&config).validate().unwrap_err();
        assert!(err.to_string().contains("loud"));

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(Settings::from_toml(&config).validate().is_ok());
    }
}
