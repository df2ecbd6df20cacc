use crate::{
    api_config::ApiConfig,
    error::{BackupError, Result},
    models::{
        BackupInfo, BackupOperate, BackupOption, BackupRequest, BatchDelete, ClientInfo,
        FileEntry, ForBucket, OperateById, PageResult, RecordDownload, RecordInfo,
        RecoverRequest, SearchBackupRecord, SearchBackupRecordByCronjob, SearchWithType,
    },
    redact::{CarriesCredentials, redact_credentials},
    routes::Operation,
    transport::{HttpTransport, RequestDescriptor, Transport},
};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;

/// 备份服务客户端
///
/// 无状态：每个方法生成一个请求描述并交给传输层发送，结果原样返回。
/// 携带凭据的请求（新增、编辑账号和列举存储桶）只发送混淆后的副本。
#[derive(Debug, Clone)]
pub struct BackupServiceClient<T = HttpTransport> {
    transport: T,
    default_timeout: Duration,
}

impl BackupServiceClient<HttpTransport> {
    /// 使用 HTTP 传输创建客户端
    pub fn from_config(config: &ApiConfig, language: Option<&str>) -> Result<Self> {
        let mut transport = HttpTransport::new(config.clone())?;
        if let Some(language) = language {
            transport = transport.with_language(language);
        }
        Ok(Self::new(transport, config.default_timeout()))
    }
}

impl<T: Transport> BackupServiceClient<T> {
    pub fn new(transport: T, default_timeout: Duration) -> Self {
        Self {
            transport,
            default_timeout,
        }
    }

    /// 按路由表生成请求描述
    ///
    /// 携带凭据的操作必须经由 [`Self::prepare_redacted`]。
    pub fn prepare(&self, operation: Operation) -> RequestDescriptor {
        debug_assert!(
            !operation.carries_credentials(),
            "{operation} 携带凭据，应使用 prepare_redacted"
        );
        RequestDescriptor::new(operation, self.default_timeout)
    }

    /// 生成带凭据混淆的请求描述，调用方的原值不会被修改
    pub fn prepare_redacted<P>(&self, operation: Operation, payload: &P) -> Result<RequestDescriptor>
    where
        P: CarriesCredentials + Serialize,
    {
        if !operation.carries_credentials() {
            return Err(BackupError::custom(format!(
                "{operation} 不携带凭据，无需混淆"
            )));
        }
        let redacted = redact_credentials(payload);
        RequestDescriptor::new(operation, self.default_timeout).with_json(&redacted)
    }

    async fn send(&self, request: RequestDescriptor) -> Result<serde_json::Value> {
        debug!(
            operation = %request.operation,
            method = %request.method,
            path = %request.path,
            timeout_secs = request.timeout.as_secs(),
            "发送备份服务请求"
        );
        self.transport.execute(&request).await
    }

    async fn call<R: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<R> {
        let data = self.send(request).await?;
        Ok(serde_json::from_value(data)?)
    }

    async fn call_list<R: DeserializeOwned>(&self, request: RequestDescriptor) -> Result<Vec<R>> {
        let list: Option<Vec<R>> = self.call(request).await?;
        Ok(list.unwrap_or_default())
    }

    async fn call_unit(&self, request: RequestDescriptor) -> Result<()> {
        self.send(request).await.map(|_| ())
    }

    // ========================================
    // 备份与恢复
    // ========================================

    /// 列出支持的备份目标类型
    pub async fn list_backup_options(&self) -> Result<Vec<BackupOption>> {
        self.call_list(self.prepare(Operation::ListBackupOptions))
            .await
    }

    pub async fn backup(&self, params: &BackupRequest) -> Result<()> {
        self.call_unit(self.prepare(Operation::Backup).with_json(params)?)
            .await
    }

    pub async fn recover(&self, params: &RecoverRequest) -> Result<()> {
        self.call_unit(self.prepare(Operation::Recover).with_json(params)?)
            .await
    }

    /// 从上传的文件恢复
    pub async fn recover_by_upload(&self, params: &RecoverRequest) -> Result<()> {
        self.call_unit(self.prepare(Operation::RecoverByUpload).with_json(params)?)
            .await
    }

    /// 获取备份记录的下载地址
    pub async fn download_record(&self, params: &RecordDownload) -> Result<String> {
        self.call(self.prepare(Operation::DownloadRecord).with_json(params)?)
            .await
    }

    pub async fn delete_records(&self, ids: &[u64]) -> Result<()> {
        let body = BatchDelete { ids: ids.to_vec() };
        self.call_unit(self.prepare(Operation::DeleteRecord).with_json(&body)?)
            .await
    }

    pub async fn search_records(
        &self,
        params: &SearchBackupRecord,
    ) -> Result<PageResult<RecordInfo>> {
        self.call(self.prepare(Operation::SearchRecords).with_json(params)?)
            .await
    }

    pub async fn search_records_by_cronjob(
        &self,
        params: &SearchBackupRecordByCronjob,
    ) -> Result<PageResult<RecordInfo>> {
        self.call(
            self.prepare(Operation::SearchRecordsByCronjob)
                .with_json(params)?,
        )
        .await
    }

    /// 列出备份记录中的文件
    pub async fn list_files_in_backup(&self, record_id: u64) -> Result<Vec<FileEntry>> {
        let body = OperateById { id: record_id };
        self.call_list(self.prepare(Operation::ListFilesInBackup).with_json(&body)?)
            .await
    }

    // ========================================
    // 备份账号
    // ========================================

    pub async fn refresh_token(&self) -> Result<()> {
        let body = serde_json::json!({});
        self.call_unit(self.prepare(Operation::RefreshToken).with_json(&body)?)
            .await
    }

    /// 获取本地备份目录
    pub async fn get_local_backup_dir(&self) -> Result<String> {
        self.call(self.prepare(Operation::GetLocalBackupDir)).await
    }

    pub async fn search(&self, params: &SearchWithType) -> Result<PageResult<BackupInfo>> {
        self.call(self.prepare(Operation::Search).with_json(params)?)
            .await
    }

    /// 获取预置的第三方客户端信息
    pub async fn get_client_info(&self, client_type: &str) -> Result<ClientInfo> {
        let valid = !client_type.is_empty()
            && client_type
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(BackupError::custom(format!(
                "无效的客户端类型: {client_type}"
            )));
        }

        let request = self
            .prepare(Operation::GetClientInfo)
            .with_path_param("client_type", client_type);
        self.call(request).await
    }

    /// 新增备份账号，服务端可能回显账号信息
    pub async fn add_backup(&self, params: &BackupOperate) -> Result<Option<BackupOperate>> {
        self.call(self.prepare_redacted(Operation::AddBackup, params)?)
            .await
    }

    pub async fn edit_backup(&self, params: &BackupOperate) -> Result<()> {
        self.call_unit(self.prepare_redacted(Operation::EditBackup, params)?)
            .await
    }

    pub async fn delete_backup(&self, id: u64) -> Result<()> {
        let body = OperateById { id };
        self.call_unit(self.prepare(Operation::DeleteBackup).with_json(&body)?)
            .await
    }

    /// 列出存储桶，账号尚未创建时使用
    pub async fn list_bucket(&self, params: &ForBucket) -> Result<Vec<String>> {
        self.call_list(self.prepare_redacted(Operation::ListBucket, params)?)
            .await
    }
}
