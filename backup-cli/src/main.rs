use backup_cli::{Cli, CliApp, setup_logging};
use clap::Parser;
use client_core::{BackupError, i18n};
use tracing::error;

#[tokio::main]
async fn main() {
    // 解析命令行参数
    let cli = Cli::parse();

    // 设置日志记录
    setup_logging(cli.verbose);

    let app = match CliApp::new(cli.config.as_deref()) {
        Ok(app) => app,
        Err(e) => {
            if let Some(BackupError::ConfigNotFound(path)) = e.downcast_ref::<BackupError>() {
                error!("❌ 配置文件 '{}' 未找到。", path.display());
                error!("👉 请检查 --config 路径，或省略该参数以使用当前目录的默认配置。");
            } else {
                error!("❌ 应用初始化失败: {:#}", e);
            }
            std::process::exit(1);
        }
    };

    // 运行命令
    if let Err(e) = app.run(cli.command).await {
        let message = match &e {
            BackupError::Timeout { timeout, .. } => {
                let secs = timeout.as_secs().to_string();
                i18n::t_args("common.timeout", &[("secs", secs.as_str())])
            }
            other => {
                let detail = other.to_string();
                i18n::t_args("common.failed", &[("error", detail.as_str())])
            }
        };
        error!("❌ {}", message);
        std::process::exit(1);
    }
}
