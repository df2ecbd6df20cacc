//! 备份服务的请求与响应数据结构
//!
//! 所有结构体均为一次调用内的临时对象，字段名与服务端 JSON 保持一致（camelCase）。

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 服务端返回的未知字段，客户端原样保留
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// 备份内容中的文件条目，结构由服务端决定
pub type FileEntry = serde_json::Value;

const MASK: &str = "******";

fn mask(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| MASK)
}

/// 支持的备份目标类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupOption {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_public: bool,
}

/// 创建/编辑备份账号的请求体
///
/// `access_key` 与 `credential` 在调用边界上是明文，发送前由
/// [`crate::redact`] 处理，不会以明文上送。
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupOperate {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub bucket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default)]
    pub backup_path: String,
    /// 各存储类型特有的参数，服务端约定为 JSON 字符串
    #[serde(default)]
    pub vars: String,
    #[serde(default)]
    pub remember_auth: bool,
}

impl BackupOperate {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_access_key(mut self, access_key: impl Into<String>) -> Self {
        self.access_key = Some(access_key.into());
        self
    }

    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }
}

impl fmt::Debug for BackupOperate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackupOperate")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("is_public", &self.is_public)
            .field("bucket", &self.bucket)
            .field("access_key", &mask(&self.access_key))
            .field("credential", &mask(&self.credential))
            .field("backup_path", &self.backup_path)
            .field("vars", &self.vars)
            .field("remember_auth", &self.remember_auth)
            .finish()
    }
}

/// 在账号创建前列举存储桶的请求体
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForBucket {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
    #[serde(default)]
    pub vars: String,
}

impl ForBucket {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }
}

impl fmt::Debug for ForBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForBucket")
            .field("kind", &self.kind)
            .field("access_key", &mask(&self.access_key))
            .field("credential", &mask(&self.credential))
            .field("vars", &self.vars)
            .finish()
    }
}

/// 已配置的备份账号
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupInfo {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub access_key: Option<String>,
    #[serde(default)]
    pub credential: Option<String>,
    #[serde(default)]
    pub backup_path: String,
    #[serde(default)]
    pub vars: String,
    #[serde(default)]
    pub remember_auth: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(flatten)]
    pub extra: Extra,
}

impl fmt::Debug for BackupInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackupInfo")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("bucket", &self.bucket)
            .field("access_key", &mask(&self.access_key))
            .field("credential", &mask(&self.credential))
            .field("backup_path", &self.backup_path)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// 单次备份/恢复执行记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordInfo {
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(rename = "downloadAccountID", default)]
    pub download_account_id: u64,
    #[serde(default)]
    pub file_dir: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub size: i64,
    #[serde(flatten)]
    pub extra: Extra,
}

/// 分页结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResult<T> {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }
}

/// 按类型分页查询备份记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBackupRecord {
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail_name: String,
}

/// 按计划任务分页查询备份记录
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBackupRecordByCronjob {
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "cronjobID")]
    pub cronjob_id: u64,
}

/// 按账号类型分页查询备份账号
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchWithType {
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub info: String,
}

/// 发起备份
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail_name: String,
    #[serde(default)]
    pub secret: String,
    #[serde(rename = "taskID", default)]
    pub task_id: String,
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub args: Vec<String>,
}

/// 从备份恢复
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecoverRequest {
    #[serde(rename = "downloadAccountID", default)]
    pub download_account_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub detail_name: String,
    pub file: String,
    #[serde(default)]
    pub secret: String,
    #[serde(rename = "taskID", default)]
    pub task_id: String,
    #[serde(rename = "backupRecordID", default)]
    pub backup_record_id: u64,
}

/// 下载备份记录对应的文件
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDownload {
    #[serde(rename = "downloadAccountID")]
    pub download_account_id: u64,
    pub file_dir: String,
    pub file_name: String,
}

/// 预置的第三方客户端信息（如 OneDrive 应用）
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uri: String,
}

impl fmt::Debug for ClientInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientInfo")
            .field("client_id", &self.client_id)
            .field("client_secret", &MASK)
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// 按 ID 操作
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OperateById {
    pub id: u64,
}

/// 批量删除
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchDelete {
    pub ids: Vec<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backup_operate_wire_names() {
        let operate = BackupOperate::new("S3", "archive").with_access_key("AK");
        let value = serde_json::to_value(&operate).unwrap();

        assert_eq!(value["type"], "S3");
        assert_eq!(value["accessKey"], "AK");
        assert_eq!(value["backupPath"], "");
        assert_eq!(value["rememberAuth"], false);
        // 未设置的凭据字段不出现在请求体中
        assert!(value.get("credential").is_none());
    }

    #[test]
    fn test_debug_masks_secrets() {
        let operate = BackupOperate::new("S3", "archive")
            .with_access_key("AK123")
            .with_credential("secret");
        let printed = format!("{operate:?}");
        assert!(!printed.contains("AK123"));
        assert!(!printed.contains("secret"));
        assert!(printed.contains(MASK));

        let mut bucket = ForBucket::new("S3");
        bucket.access_key = Some("AK123".to_string());
        assert!(!format!("{bucket:?}").contains("AK123"));
    }

    #[test]
    fn test_record_page_keeps_unknown_fields() {
        let page: PageResult<RecordInfo> = serde_json::from_value(json!({
            "total": 1,
            "items": [{
                "id": 7,
                "createdAt": "2024-05-01T10:00:00+08:00",
                "accountType": "LOCAL",
                "accountName": "localhost",
                "downloadAccountID": 1,
                "fileDir": "/opt/backup/app",
                "fileName": "app_20240501.tar.gz",
                "size": 2048,
                "description": "nightly"
            }]
        }))
        .unwrap();

        assert_eq!(page.total, 1);
        let record = &page.items[0];
        assert_eq!(record.id, 7);
        assert_eq!(record.download_account_id, 1);
        assert!(record.created_at.is_some());
        assert_eq!(record.extra["description"], "nightly");
    }

    #[test]
    fn test_id_suffixed_fields() {
        let search = SearchBackupRecordByCronjob {
            page: 1,
            page_size: 10,
            cronjob_id: 3,
        };
        let value = serde_json::to_value(&search).unwrap();
        assert_eq!(value, json!({"page": 1, "pageSize": 10, "cronjobID": 3}));

        let recover = RecoverRequest {
            kind: "app".to_string(),
            file: "/tmp/a.tar.gz".to_string(),
            backup_record_id: 9,
            ..Default::default()
        };
        let value = serde_json::to_value(&recover).unwrap();
        assert_eq!(value["backupRecordID"], 9);
        assert_eq!(value["downloadAccountID"], 0);
        assert_eq!(value["taskID"], "");
    }
}
