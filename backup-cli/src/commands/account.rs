use crate::app::CliApp;
use crate::cli::{AccountArgs, AccountCommand};
use crate::utils::print_json;
use client_core::{
    error::Result,
    models::{BackupOperate, ForBucket, SearchWithType},
};
use tracing::info;

/// 由命令行参数构造账号请求体，凭据保持明文，由客户端负责编码
pub(crate) fn to_operate(id: u64, args: AccountArgs) -> BackupOperate {
    BackupOperate {
        id,
        name: args.name,
        kind: args.kind,
        is_public: args.public,
        bucket: args.bucket,
        access_key: args.access_key,
        credential: args.credential,
        backup_path: args.backup_path,
        vars: args.vars,
        remember_auth: args.remember_auth,
    }
}

fn has_secret(access_key: &Option<String>, credential: &Option<String>) -> bool {
    [access_key, credential]
        .into_iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
}

fn notice_encoding(app: &CliApp) {
    info!("🔐 {}", app.localizer.t("account.encoding_notice"));
}

/// 运行备份账号相关命令
pub async fn handle_account_command(app: &CliApp, cmd: AccountCommand) -> Result<()> {
    match cmd {
        AccountCommand::Search {
            kind,
            info,
            page,
            page_size,
        } => {
            let search = SearchWithType {
                page,
                page_size,
                kind,
                info,
            };
            print_json(&app.client.search(&search).await?)
        }
        AccountCommand::Add(args) => {
            let operate = to_operate(0, args);
            if has_secret(&operate.access_key, &operate.credential) {
                notice_encoding(app);
            }
            let echo = app.client.add_backup(&operate).await?;
            info!("✅ {}", app.localizer.t("account.added"));
            match echo {
                Some(echo) => print_json(&echo),
                None => Ok(()),
            }
        }
        AccountCommand::Edit { id, account } => {
            let operate = to_operate(id, account);
            if has_secret(&operate.access_key, &operate.credential) {
                notice_encoding(app);
            }
            app.client.edit_backup(&operate).await?;
            info!("✅ {}", app.localizer.t("account.updated"));
            Ok(())
        }
        AccountCommand::Delete { id } => {
            app.client.delete_backup(id).await?;
            let id = id.to_string();
            info!(
                "🗑️  {}",
                app.localizer.t_args("account.deleted", &[("id", id.as_str())])
            );
            Ok(())
        }
        AccountCommand::Buckets {
            kind,
            vars,
            access_key,
            credential,
        } => {
            let request = ForBucket {
                kind,
                access_key,
                credential,
                vars,
            };
            if has_secret(&request.access_key, &request.credential) {
                notice_encoding(app);
            }
            print_json(&app.client.list_bucket(&request).await?)
        }
        AccountCommand::ClientInfo { client_type } => {
            print_json(&app.client.get_client_info(&client_type).await?)
        }
    }
}
