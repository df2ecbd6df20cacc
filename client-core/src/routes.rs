//! 备份服务的路由表：每个操作对应固定的请求方法、路径与超时等级

use crate::constants::{api::endpoints, timeout};
use reqwest::Method;
use std::fmt;
use std::time::Duration;

/// 超时等级，仅作为等待期限，不涉及重试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutClass {
    /// 使用配置中的默认超时
    Default,
    Seconds60,
    Minutes5,
    Minutes10,
    Hour1,
    Day1,
}

impl TimeoutClass {
    /// 解析为具体时长，`Default` 取传入的默认值
    pub fn resolve(self, default: Duration) -> Duration {
        match self {
            Self::Default => default,
            Self::Seconds60 => Duration::from_secs(timeout::SECONDS_60),
            Self::Minutes5 => Duration::from_secs(timeout::MINUTES_5),
            Self::Minutes10 => Duration::from_secs(timeout::MINUTES_10),
            Self::Hour1 => Duration::from_secs(timeout::HOUR_1),
            Self::Day1 => Duration::from_secs(timeout::DAY_1),
        }
    }
}

/// 单个操作的固定描述
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub method: Method,
    pub path: &'static str,
    pub timeout: TimeoutClass,
}

/// 备份服务支持的全部操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListBackupOptions,
    Backup,
    Recover,
    RecoverByUpload,
    DownloadRecord,
    DeleteRecord,
    SearchRecords,
    SearchRecordsByCronjob,
    ListFilesInBackup,
    RefreshToken,
    GetLocalBackupDir,
    Search,
    GetClientInfo,
    AddBackup,
    EditBackup,
    DeleteBackup,
    ListBucket,
}

impl Operation {
    pub const ALL: [Operation; 17] = [
        Self::ListBackupOptions,
        Self::Backup,
        Self::Recover,
        Self::RecoverByUpload,
        Self::DownloadRecord,
        Self::DeleteRecord,
        Self::SearchRecords,
        Self::SearchRecordsByCronjob,
        Self::ListFilesInBackup,
        Self::RefreshToken,
        Self::GetLocalBackupDir,
        Self::Search,
        Self::GetClientInfo,
        Self::AddBackup,
        Self::EditBackup,
        Self::DeleteBackup,
        Self::ListBucket,
    ];

    pub fn route(self) -> Route {
        use TimeoutClass as T;

        let (method, path, timeout) = match self {
            Self::ListBackupOptions => (Method::GET, endpoints::BACKUP_OPTIONS, T::Default),
            Self::Backup => (Method::POST, endpoints::BACKUP, T::Hour1),
            Self::Recover => (Method::POST, endpoints::RECOVER, T::Day1),
            Self::RecoverByUpload => (Method::POST, endpoints::RECOVER_BY_UPLOAD, T::Day1),
            Self::DownloadRecord => (Method::POST, endpoints::RECORD_DOWNLOAD, T::Minutes10),
            Self::DeleteRecord => (Method::POST, endpoints::RECORD_DELETE, T::Default),
            Self::SearchRecords => (Method::POST, endpoints::RECORD_SEARCH, T::Minutes5),
            Self::SearchRecordsByCronjob => {
                (Method::POST, endpoints::RECORD_SEARCH_BY_CRONJOB, T::Minutes5)
            }
            Self::ListFilesInBackup => (Method::POST, endpoints::BACKUP_FILES, T::Default),
            Self::RefreshToken => (Method::POST, endpoints::REFRESH_TOKEN, T::Default),
            Self::GetLocalBackupDir => (Method::GET, endpoints::LOCAL_DIR, T::Default),
            Self::Search => (Method::POST, endpoints::ACCOUNT_SEARCH, T::Default),
            Self::GetClientInfo => (Method::GET, endpoints::CLIENT_INFO, T::Default),
            Self::AddBackup => (Method::POST, endpoints::ACCOUNT_CREATE, T::Seconds60),
            Self::EditBackup => (Method::POST, endpoints::ACCOUNT_UPDATE, T::Default),
            Self::DeleteBackup => (Method::POST, endpoints::ACCOUNT_DELETE, T::Default),
            Self::ListBucket => (Method::POST, endpoints::BUCKETS, T::Default),
        };

        Route {
            method,
            path,
            timeout,
        }
    }

    /// 请求体中是否可能携带需要混淆的凭据
    pub fn carries_credentials(self) -> bool {
        matches!(self, Self::AddBackup | Self::EditBackup | Self::ListBucket)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ListBackupOptions => "listBackupOptions",
            Self::Backup => "backup",
            Self::Recover => "recover",
            Self::RecoverByUpload => "recoverByUpload",
            Self::DownloadRecord => "downloadRecord",
            Self::DeleteRecord => "deleteRecord",
            Self::SearchRecords => "searchRecords",
            Self::SearchRecordsByCronjob => "searchRecordsByCronjob",
            Self::ListFilesInBackup => "listFilesInBackup",
            Self::RefreshToken => "refreshToken",
            Self::GetLocalBackupDir => "getLocalBackupDir",
            Self::Search => "search",
            Self::GetClientInfo => "getClientInfo",
            Self::AddBackup => "addBackup",
            Self::EditBackup => "editBackup",
            Self::DeleteBackup => "deleteBackup",
            Self::ListBucket => "listBucket",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routes_are_unique() {
        let mut seen = HashSet::new();
        for op in Operation::ALL {
            let route = op.route();
            assert!(
                seen.insert((route.method.clone(), route.path)),
                "{op} 与其他操作共用了 {} {}",
                route.method,
                route.path
            );
            assert!(route.path.starts_with('/'));
        }
        assert_eq!(seen.len(), 17);
    }

    #[test]
    fn test_long_running_timeouts() {
        let default = Duration::from_secs(30);
        let secs = |op: Operation| op.route().timeout.resolve(default).as_secs();

        assert_eq!(secs(Operation::Backup), 3600);
        assert_eq!(secs(Operation::Recover), 86400);
        assert_eq!(secs(Operation::RecoverByUpload), 86400);
        assert_eq!(secs(Operation::DownloadRecord), 600);
        assert_eq!(secs(Operation::SearchRecords), 300);
        assert_eq!(secs(Operation::SearchRecordsByCronjob), 300);
        assert_eq!(secs(Operation::AddBackup), 60);
        assert_eq!(secs(Operation::ListBucket), 30);
        assert_eq!(secs(Operation::EditBackup), 30);
    }

    #[test]
    fn test_only_account_writes_carry_credentials() {
        let carrying: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.carries_credentials())
            .collect();
        assert_eq!(
            carrying,
            vec![
                Operation::AddBackup,
                Operation::EditBackup,
                Operation::ListBucket
            ]
        );
    }

    #[test]
    fn test_get_routes() {
        let gets: Vec<_> = Operation::ALL
            .into_iter()
            .filter(|op| op.route().method == Method::GET)
            .collect();
        assert_eq!(
            gets,
            vec![
                Operation::ListBackupOptions,
                Operation::GetLocalBackupDir,
                Operation::GetClientInfo
            ]
        );
    }
}
