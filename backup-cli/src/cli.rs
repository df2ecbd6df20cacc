use crate::project_info::{metadata, version_info};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// 备份记录相关命令
#[derive(Subcommand, Debug)]
pub enum RecordCommand {
    /// 按类型分页查询备份记录
    Search {
        /// 备份类型，例如 app、website、mysql
        #[arg(long = "type")]
        kind: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        detail_name: String,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        page_size: u32,
    },
    /// 按计划任务分页查询备份记录
    SearchByCronjob {
        /// 计划任务 ID
        cronjob_id: u64,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        page_size: u32,
    },
    /// 获取备份文件的下载路径
    Download {
        #[arg(long)]
        download_account_id: u64,
        #[arg(long)]
        file_dir: String,
        #[arg(long)]
        file_name: String,
    },
    /// 删除备份记录
    Delete {
        /// 记录 ID，可指定多个
        #[arg(required = true)]
        ids: Vec<u64>,
    },
    /// 列出备份记录中的文件
    Files {
        /// 记录 ID
        id: u64,
    },
}

/// 备份账号的通用参数
#[derive(Args, Debug, Clone)]
pub struct AccountArgs {
    /// 存储类型，例如 S3、OSS、SFTP、LOCAL
    #[arg(long = "type")]
    pub kind: String,
    /// 账号名称
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub bucket: String,
    #[arg(long, default_value = "")]
    pub backup_path: String,
    /// 存储类型特有参数（JSON 字符串）
    #[arg(long, default_value = "")]
    pub vars: String,
    /// 所有节点可见
    #[arg(long)]
    pub public: bool,
    /// 记住认证信息
    #[arg(long)]
    pub remember_auth: bool,
    /// AccessKey，发送前做 Base64 编码
    #[arg(long, env = "BACKUP_ACCESS_KEY", hide_env_values = true)]
    pub access_key: Option<String>,
    /// 凭据（SecretKey / 密码），发送前做 Base64 编码
    #[arg(long, env = "BACKUP_CREDENTIAL", hide_env_values = true)]
    pub credential: Option<String>,
}

/// 备份账号相关命令
#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    /// 分页查询备份账号
    Search {
        #[arg(long = "type", default_value = "")]
        kind: String,
        /// 名称关键字
        #[arg(long, default_value = "")]
        info: String,
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "20")]
        page_size: u32,
    },
    /// 新增备份账号
    Add(AccountArgs),
    /// 编辑备份账号
    Edit {
        /// 账号 ID
        id: u64,
        #[command(flatten)]
        account: AccountArgs,
    },
    /// 删除备份账号
    Delete {
        /// 账号 ID
        id: u64,
    },
    /// 列出存储桶（创建账号前验证认证信息）
    Buckets {
        #[arg(long = "type")]
        kind: String,
        #[arg(long, default_value = "")]
        vars: String,
        #[arg(long, env = "BACKUP_ACCESS_KEY", hide_env_values = true)]
        access_key: Option<String>,
        #[arg(long, env = "BACKUP_CREDENTIAL", hide_env_values = true)]
        credential: Option<String>,
    },
    /// 获取预置的第三方客户端信息
    ClientInfo {
        /// 客户端类型，例如 OneDrive
        client_type: String,
    },
}

/// Backup CLI - 面板备份服务命令行客户端
#[derive(Parser)]
#[command(name = "backup-cli")]
#[command(about = metadata::PROJECT_DESCRIPTION)]
#[command(version = version_info::CLI_VERSION)]
#[command(long_about = metadata::display::DESCRIPTION_LONG)]
#[command(author = metadata::PROJECT_AUTHORS)]
pub struct Cli {
    /// 配置文件路径，未指定时在当前目录查找或创建默认配置
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 详细输出
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 显示当前API配置信息
    ApiInfo,
    /// 列出支持的备份目标类型
    Options,
    /// 发起备份
    Backup {
        #[arg(long = "type")]
        kind: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        detail_name: String,
        /// 压缩包密码
        #[arg(long, default_value = "", hide_default_value = true)]
        secret: String,
        #[arg(long, default_value = "")]
        task_id: String,
        #[arg(long, default_value = "")]
        file_name: String,
        /// 附加参数，可指定多个
        #[arg(long = "arg")]
        args: Vec<String>,
    },
    /// 从备份恢复
    Recover {
        #[arg(long = "type")]
        kind: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        detail_name: String,
        /// 备份文件路径
        #[arg(long)]
        file: String,
        #[arg(long, default_value = "0")]
        download_account_id: u64,
        #[arg(long, default_value = "0")]
        record_id: u64,
        #[arg(long, default_value = "", hide_default_value = true)]
        secret: String,
        #[arg(long, default_value = "")]
        task_id: String,
        /// 文件为手动上传
        #[arg(long)]
        by_upload: bool,
    },
    /// 备份记录管理
    #[command(subcommand)]
    Record(RecordCommand),
    /// 备份账号管理
    #[command(subcommand)]
    Account(AccountCommand),
    /// 显示本地备份目录
    LocalDir,
    /// 触发第三方存储的令牌刷新
    RefreshToken,
    /// 查看或设置界面语言
    Lang {
        /// zh、tw、en、ru、ms 之一；省略时显示当前语言
        language: Option<String>,
    },
}
