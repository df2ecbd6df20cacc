//! API配置模块 - 面板服务地址与默认超时

use crate::constants::api;
use crate::routes::Operation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// API配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// 基础URL
    pub base_url: String,
    /// API版本前缀
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// 默认超时等级对应的秒数
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
}

fn default_api_prefix() -> String {
    api::VERSION_PREFIX.to_string()
}

fn default_timeout_secs() -> u64 {
    api::http::DEFAULT_TIMEOUT
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            api_prefix: default_api_prefix(),
            default_timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// 获取完整的端点URL
    pub fn get_endpoint_url(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/'),
            path
        )
    }

    /// 默认超时时长，至少 1 秒
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs.max(1))
    }

    /// 获取所有端点信息，用于CLI帮助显示
    pub fn get_endpoints_info(&self) -> Vec<(&'static str, String)> {
        Operation::ALL
            .into_iter()
            .map(|op| {
                let route = op.route();
                (op.name(), format!("{} {}", route.method, self.get_endpoint_url(route.path)))
            })
            .collect()
    }
}

impl fmt::Display for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "当前API配置:")?;
        writeln!(f, "服务器地址: {}", self.base_url)?;
        writeln!(f, "默认超时: {}s", self.default_timeout_secs)?;
        writeln!(f, "\n备份端点:")?;
        for (name, url) in self.get_endpoints_info() {
            writeln!(f, "  {name}: {url}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_prefix() {
        let config = ApiConfig::new("https://panel.example.com:8443/");
        assert_eq!(
            config.get_endpoint_url("/core/backups/local"),
            "https://panel.example.com:8443/api/v2/core/backups/local"
        );
    }

    #[test]
    fn test_zero_default_timeout_clamped() {
        let mut config = ApiConfig::default();
        assert_eq!(config.default_timeout(), Duration::from_secs(30));

        config.default_timeout_secs = 0;
        assert_eq!(config.default_timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_display_lists_every_operation() {
        let printed = ApiConfig::default().to_string();
        for op in Operation::ALL {
            assert!(printed.contains(op.name()), "缺少 {op}");
        }
    }
}
