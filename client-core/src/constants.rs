/// API服务相关常量
pub mod api {
    /// 默认面板服务地址
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:9999";

    /// API版本前缀
    pub const VERSION_PREFIX: &str = "/api/v2";

    /// 服务端约定的成功业务码
    pub const CODE_SUCCESS: i64 = 200;

    /// API端点路径（相对于版本前缀）
    pub mod endpoints {
        // 备份代理（agent）侧
        pub const BACKUP_OPTIONS: &str = "/backups/options";
        pub const BACKUP: &str = "/backups/backup";
        pub const RECOVER: &str = "/backups/recover";
        pub const RECOVER_BY_UPLOAD: &str = "/backups/recover/byupload";
        pub const RECORD_DOWNLOAD: &str = "/backups/record/download";
        pub const RECORD_DELETE: &str = "/backups/record/del";
        pub const RECORD_SEARCH: &str = "/backups/record/search";
        pub const RECORD_SEARCH_BY_CRONJOB: &str = "/backups/record/search/bycronjob";
        pub const BACKUP_FILES: &str = "/backups/search/files";

        // 核心（core）侧
        pub const REFRESH_TOKEN: &str = "/core/backups/refresh/token";
        pub const LOCAL_DIR: &str = "/core/backups/local";
        pub const ACCOUNT_SEARCH: &str = "/core/backups/search";
        /// 包含 `{client_type}` 占位符
        pub const CLIENT_INFO: &str = "/core/backups/client/{client_type}";
        pub const ACCOUNT_CREATE: &str = "/core/backups";
        pub const ACCOUNT_UPDATE: &str = "/core/backups/update";
        pub const ACCOUNT_DELETE: &str = "/core/backups/del";
        pub const BUCKETS: &str = "/core/backups/buckets";
    }

    /// HTTP相关常量
    pub mod http {
        /// 默认请求超时时间（秒）
        pub const DEFAULT_TIMEOUT: u64 = 30;

        /// User-Agent头
        pub const USER_AGENT: &str = concat!("backup-client/", env!("CARGO_PKG_VERSION"));
    }
}

/// 超时等级对应的时长（秒）
pub mod timeout {
    pub const SECONDS_60: u64 = 60;
    pub const MINUTES_5: u64 = 5 * 60;
    pub const MINUTES_10: u64 = 10 * 60;
    pub const HOUR_1: u64 = 60 * 60;
    pub const DAY_1: u64 = 24 * 60 * 60;
}

/// 多语言相关常量
pub mod i18n {
    /// 持久化语言偏好的键名
    pub const LANG_KEY: &str = "lang";

    /// 兜底语言
    pub const FALLBACK_LANGUAGE: &str = "en";

    /// 支持的语言标签
    pub const SUPPORTED_LANGUAGES: [&str; 5] = ["zh", "tw", "en", "ru", "ms"];

    /// 默认的语言偏好文件
    pub const DEFAULT_PREFERENCE_FILE: &str = "lang.toml";
}

/// 配置文件相关常量
pub mod config {
    /// 按优先级查找的配置文件名
    pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
        ["config.toml", "backup-client.toml", ".backup-client.toml"];

    /// 默认配置文件名
    pub const DEFAULT_CONFIG_FILE: &str = "config.toml";
}
