/// Backup CLI 项目信息模块
///
/// 面向用户的元数据统一在这里定义，client-core 只提供技术性常量

/// 项目元数据（自动从 Cargo.toml 同步）
pub mod metadata {
    /// 项目名称
    pub const PROJECT_NAME: &str = env!("CARGO_PKG_NAME");

    /// 项目描述
    pub const PROJECT_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

    /// 项目作者
    pub const PROJECT_AUTHORS: &str = env!("CARGO_PKG_AUTHORS");

    /// 用户友好的显示名称
    pub mod display {
        pub const CLI_FULL_NAME: &str = "Backup Client CLI";

        pub const DESCRIPTION_LONG: &str = "面板备份服务的命令行客户端：管理备份账号、发起备份与恢复、查询和下载备份记录";
    }
}

/// 版本信息
pub mod version_info {
    pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// 获取版本信息字符串
pub fn get_version_string() -> String {
    format!(
        "{} v{}",
        metadata::display::CLI_FULL_NAME,
        version_info::CLI_VERSION
    )
}
