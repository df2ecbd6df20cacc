use crate::api_config::ApiConfig;
use crate::constants::{config, i18n};
use crate::error::{BackupError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 应用配置结构
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ApiConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
}

/// 多语言相关配置
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct I18nConfig {
    /// 没有用户偏好时使用的语言
    #[serde(default = "default_language")]
    pub default_language: String,
    /// 用户语言偏好的保存位置
    #[serde(default = "default_preference_file")]
    pub preference_file: String,
}

fn default_language() -> String {
    i18n::FALLBACK_LANGUAGE.to_string()
}

fn default_preference_file() -> String {
    Path::new(".")
        .join(i18n::DEFAULT_PREFERENCE_FILE)
        .to_string_lossy()
        .to_string()
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            preference_file: default_preference_file(),
        }
    }
}

impl AppConfig {
    /// 加载配置：显式指定的文件必须存在，未指定时在当前目录查找
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) if !path.exists() => Err(BackupError::ConfigNotFound(path.to_path_buf())),
            Some(path) => Self::load_from_file(path),
            None => Self::find_and_load_config(),
        }
    }

    /// 智能查找并加载配置文件
    /// 按优先级查找：config.toml -> backup-client.toml -> .backup-client.toml
    pub fn find_and_load_config() -> Result<Self> {
        Self::find_and_load_config_in(Path::new("."))
    }

    /// 在指定目录中查找配置文件，都不存在时在该目录创建默认配置
    pub fn find_and_load_config_in(dir: &Path) -> Result<Self> {
        for config_file in &config::CONFIG_FILE_CANDIDATES {
            let candidate = dir.join(config_file);
            if candidate.exists() {
                tracing::info!("找到配置文件: {}", candidate.display());
                return Self::load_from_file(&candidate);
            }
        }

        // 如果没找到配置文件，创建默认配置
        let target = dir.join(config::DEFAULT_CONFIG_FILE);
        tracing::warn!("未找到配置文件，创建默认配置: {}", target.display());
        let default_config = Self::default();
        default_config.save_to_file(&target)?;
        Ok(default_config)
    }

    /// 从指定文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.server.default_timeout_secs == 0 {
            return Err(BackupError::custom(
                "server.default_timeout_secs 必须大于 0",
            ));
        }
        Ok(())
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// 获取语言偏好文件路径
    pub fn get_preference_file(&self) -> PathBuf {
        PathBuf::from(&self.i18n.preference_file)
    }
}
