use crate::app::CliApp;
use crate::cli::RecordCommand;
use crate::utils::print_json;
use client_core::{
    error::Result,
    models::{RecordDownload, SearchBackupRecord, SearchBackupRecordByCronjob},
};
use tracing::info;

/// 运行备份记录相关命令
pub async fn handle_record_command(app: &CliApp, cmd: RecordCommand) -> Result<()> {
    match cmd {
        RecordCommand::Search {
            kind,
            name,
            detail_name,
            page,
            page_size,
        } => {
            let search = SearchBackupRecord {
                page,
                page_size,
                kind,
                name,
                detail_name,
            };
            print_json(&app.client.search_records(&search).await?)
        }
        RecordCommand::SearchByCronjob {
            cronjob_id,
            page,
            page_size,
        } => {
            let search = SearchBackupRecordByCronjob {
                page,
                page_size,
                cronjob_id,
            };
            print_json(&app.client.search_records_by_cronjob(&search).await?)
        }
        RecordCommand::Download {
            download_account_id,
            file_dir,
            file_name,
        } => {
            let download = RecordDownload {
                download_account_id,
                file_dir,
                file_name,
            };
            let path = app.client.download_record(&download).await?;
            info!(
                "⬇️  {}",
                app.localizer.t_args("backup.download_link", &[("path", path.as_str())])
            );
            print_json(&path)
        }
        RecordCommand::Delete { ids } => {
            app.client.delete_records(&ids).await?;
            let count = ids.len().to_string();
            info!(
                "🗑️  {}",
                app.localizer
                    .t_args("backup.records_deleted", &[("count", count.as_str())])
            );
            Ok(())
        }
        RecordCommand::Files { id } => print_json(&app.client.list_files_in_backup(id).await?),
    }
}
