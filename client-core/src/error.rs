use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BackupError>;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("配置错误: {0}")]
    Config(#[from] toml::de::Error),

    #[error("配置序列化错误: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("配置文件未找到: {}", .0.display())]
    ConfigNotFound(PathBuf),

    #[error("HTTP 请求错误: {0}")]
    Http(#[from] reqwest::Error),

    #[error("请求超时: {operation} 超过 {}s 未响应", .timeout.as_secs())]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("API请求失败: {status} - {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("服务端返回错误: [{code}] {message}")]
    Server { code: i64, message: String },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("语言配置错误: {0}")]
    Locale(String),

    #[error("自定义错误: {0}")]
    Custom(String),
}

impl BackupError {
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }

    pub fn locale(msg: impl Into<String>) -> Self {
        Self::Locale(msg.into())
    }

    /// 是否为超时导致的失败
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
