use anyhow::Context;
use client_core::{
    BackupServiceClient,
    config::AppConfig,
    error::Result,
    i18n::{self, FileLocaleStore, Localizer},
};
use std::path::Path;
use tracing::debug;

use crate::cli::Commands;
use crate::commands;

pub struct CliApp {
    pub config: AppConfig,
    pub client: BackupServiceClient,
    pub localizer: &'static Localizer,
}

impl CliApp {
    /// 加载配置并初始化语言与客户端
    ///
    /// 显式指定的配置文件不存在时直接失败；未指定时按默认文件名顺序查找。
    pub fn new(config_path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => AppConfig::resolve(Some(path))
                .with_context(|| format!("加载配置文件失败: {}", path.display()))?,
            None => AppConfig::resolve(None).context("加载默认配置失败")?,
        };

        let store = FileLocaleStore::new(config.get_preference_file());
        let localizer = i18n::init(Box::new(store), &config.i18n.default_language)
            .context("初始化多语言失败")?;

        let client = BackupServiceClient::from_config(&config.server, Some(localizer.active()))
            .context("创建HTTP客户端失败")?;
        debug!("备份服务地址: {}", config.server.base_url);

        Ok(Self {
            config,
            client,
            localizer,
        })
    }

    /// 运行应用命令
    pub async fn run(&self, command: Commands) -> Result<()> {
        match command {
            Commands::ApiInfo => commands::show_api_info(self),
            Commands::Options => commands::list_options(self).await,
            Commands::Backup {
                kind,
                name,
                detail_name,
                secret,
                task_id,
                file_name,
                args,
            } => {
                let request = client_core::models::BackupRequest {
                    kind,
                    name,
                    detail_name,
                    secret,
                    task_id,
                    file_name,
                    args,
                };
                commands::run_backup(self, request).await
            }
            Commands::Recover {
                kind,
                name,
                detail_name,
                file,
                download_account_id,
                record_id,
                secret,
                task_id,
                by_upload,
            } => {
                let request = client_core::models::RecoverRequest {
                    download_account_id,
                    kind,
                    name,
                    detail_name,
                    file,
                    secret,
                    task_id,
                    backup_record_id: record_id,
                };
                commands::run_recover(self, request, by_upload).await
            }
            Commands::Record(cmd) => commands::handle_record_command(self, cmd).await,
            Commands::Account(cmd) => commands::handle_account_command(self, cmd).await,
            Commands::LocalDir => commands::show_local_dir(self).await,
            Commands::RefreshToken => commands::refresh_token(self).await,
            Commands::Lang { language } => commands::handle_lang(self, language.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::BackupError;

    #[test]
    fn test_explicit_missing_config_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prod.toml");

        let err = match CliApp::new(Some(&path)) {
            Ok(_) => panic!("缺失的配置文件不应被默认配置替代"),
            Err(e) => e,
        };
        assert!(matches!(
            err.downcast_ref::<BackupError>(),
            Some(BackupError::ConfigNotFound(p)) if p == &path
        ));
        assert!(!path.exists());
    }
}
