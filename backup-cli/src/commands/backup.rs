use crate::app::CliApp;
use crate::utils::print_json;
use client_core::{
    error::Result,
    models::{BackupRequest, RecoverRequest},
};
use tracing::info;

/// 列出支持的备份目标
pub async fn list_options(app: &CliApp) -> Result<()> {
    let options = app.client.list_backup_options().await?;
    info!("📦 {}", app.localizer.t("backup.options_title"));
    print_json(&options)
}

/// 发起备份
pub async fn run_backup(app: &CliApp, request: BackupRequest) -> Result<()> {
    info!("💾 {} {}", request.kind, request.name);
    app.client.backup(&request).await?;
    info!("✅ {}", app.localizer.t("backup.started"));
    Ok(())
}

/// 从备份恢复
pub async fn run_recover(app: &CliApp, request: RecoverRequest, by_upload: bool) -> Result<()> {
    info!("🔄 {} {} <- {}", request.kind, request.name, request.file);
    if by_upload {
        app.client.recover_by_upload(&request).await?;
    } else {
        app.client.recover(&request).await?;
    }
    info!("✅ {}", app.localizer.t("backup.recover_started"));
    Ok(())
}

/// 显示本地备份目录
pub async fn show_local_dir(app: &CliApp) -> Result<()> {
    let dir = app.client.get_local_backup_dir().await?;
    info!(
        "📁 {}",
        app.localizer.t_args("backup.local_dir", &[("path", dir.as_str())])
    );
    print_json(&dir)
}

/// 触发令牌刷新
pub async fn refresh_token(app: &CliApp) -> Result<()> {
    app.client.refresh_token().await?;
    info!("✅ {}", app.localizer.t("account.token_refreshed"));
    Ok(())
}
