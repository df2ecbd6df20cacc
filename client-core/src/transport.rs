use crate::{
    api_config::ApiConfig,
    constants::api,
    error::{BackupError, Result},
    routes::Operation,
};
use async_trait::async_trait;
use reqwest::{Client, Method, header::ACCEPT_LANGUAGE};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

/// 发往备份服务的单个请求描述
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub operation: Operation,
    pub method: Method,
    /// 相对于 API 前缀的路径，路径参数已替换
    pub path: String,
    pub body: Option<Value>,
    pub timeout: Duration,
}

impl RequestDescriptor {
    /// 按路由表生成请求描述，默认无请求体
    pub fn new(operation: Operation, default_timeout: Duration) -> Self {
        let route = operation.route();
        Self {
            operation,
            method: route.method,
            path: route.path.to_string(),
            body: None,
            timeout: route.timeout.resolve(default_timeout),
        }
    }

    /// 设置 JSON 请求体
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// 替换路径中的 `{name}` 占位符
    pub fn with_path_param(mut self, name: &str, value: &str) -> Self {
        self.path = self.path.replace(&format!("{{{name}}}"), value);
        self
    }
}

/// 请求的实际发送方式
///
/// 成功时返回服务端响应中的 `data` 字段；失败原样上抛，不做重试。
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Value>;
}

/// 服务端统一响应结构
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Value,
}

/// 基于 reqwest 的 HTTP 传输
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: ApiConfig,
    language: Option<String>,
}

impl HttpTransport {
    /// 创建新的 HTTP 传输
    pub fn new(config: ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(api::http::USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            config,
            language: None,
        })
    }

    /// 设置随请求发送的 `Accept-Language`
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn map_error(err: reqwest::Error, request: &RequestDescriptor) -> BackupError {
        if err.is_timeout() {
            BackupError::Timeout {
                operation: request.operation.name(),
                timeout: request.timeout,
            }
        } else {
            BackupError::Http(err)
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Value> {
        let url = self.config.get_endpoint_url(&request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .timeout(request.timeout);
        if let Some(ref language) = self.language {
            builder = builder.header(ACCEPT_LANGUAGE, language);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(e, request))?;

        let status = response.status();
        if !status.is_success() {
            let text = match response.text().await {
                Ok(text) => text,
                Err(e) => {
                    debug!("{} 读取错误响应体失败: {}", request.operation, e);
                    String::new()
                }
            };
            error!("{} 请求失败: {} - {}", request.operation, status, text);
            return Err(BackupError::Api { status, body: text });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(e, request))?;
        unwrap_envelope(&bytes)
    }
}

/// 解开 `{ code, message, data }` 响应，业务错误原样返回
fn unwrap_envelope(bytes: &[u8]) -> Result<Value> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }

    let envelope: ApiEnvelope = serde_json::from_slice(bytes)?;
    if envelope.code != api::CODE_SUCCESS {
        debug!("服务端业务错误: [{}] {}", envelope.code, envelope.message);
        return Err(BackupError::Server {
            code: envelope.code,
            message: envelope.message,
        });
    }

    Ok(envelope.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
                let len = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + len {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// 启动只应答一次的本地服务，返回基础地址和收到的原始请求
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (format!("http://{addr}"), handle)
    }

    fn transport(base_url: String) -> HttpTransport {
        HttpTransport::new(ApiConfig::new(base_url)).unwrap()
    }

    #[test]
    fn test_descriptor_path_param() {
        let request = RequestDescriptor::new(Operation::GetClientInfo, Duration::from_secs(30))
            .with_path_param("client_type", "OneDrive");
        assert_eq!(request.path, "/core/backups/client/OneDrive");
        assert_eq!(request.method, Method::GET);
        assert!(request.body.is_none());
    }

    #[test]
    fn test_envelope_success_and_failure() {
        let data = unwrap_envelope(br#"{"code":200,"message":"","data":"/opt/backup"}"#).unwrap();
        assert_eq!(data, json!("/opt/backup"));

        let data = unwrap_envelope(br#"{"code":200,"message":""}"#).unwrap();
        assert_eq!(data, Value::Null);

        assert_eq!(unwrap_envelope(b"").unwrap(), Value::Null);

        let err = unwrap_envelope(br#"{"code":500,"message":"ErrBackupExist","data":null}"#)
            .unwrap_err();
        match err {
            BackupError::Server { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "ErrBackupExist");
            }
            other => panic!("意外的错误类型: {other:?}"),
        }

        assert!(matches!(
            unwrap_envelope(b"<html>").unwrap_err(),
            BackupError::Serde(_)
        ));
    }

    #[tokio::test]
    async fn test_http_transport_sends_json_body() {
        let (base_url, server) =
            serve_once("200 OK", r#"{"code":200,"message":"","data":["b1","b2"]}"#).await;

        let request = RequestDescriptor::new(Operation::ListBucket, Duration::from_secs(5))
            .with_json(&json!({"type": "S3", "accessKey": "QUsxMjM="}))
            .unwrap();
        let data = transport(base_url)
            .with_language("zh")
            .execute(&request)
            .await
            .unwrap();
        assert_eq!(data, json!(["b1", "b2"]));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/v2/core/backups/buckets HTTP/1.1"));
        assert!(raw.to_lowercase().contains("accept-language: zh"));
        assert!(raw.contains(r#""accessKey":"QUsxMjM=""#));
    }

    #[tokio::test]
    async fn test_http_status_passed_through() {
        let (base_url, server) = serve_once("404 Not Found", "no such route").await;

        let request = RequestDescriptor::new(Operation::GetLocalBackupDir, Duration::from_secs(5));
        let err = transport(base_url).execute(&request).await.unwrap_err();
        match err {
            BackupError::Api { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "no such route");
            }
            other => panic!("意外的错误类型: {other:?}"),
        }

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/v2/core/backups/local HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_status_kept_when_error_body_unreadable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            // 声明的长度大于实际发送的内容，随后断开连接
            socket
                .write_all(b"HTTP/1.1 502 Bad Gateway\r\ncontent-length: 100\r\n\r\npartial")
                .await
                .unwrap();
            let _ = socket.shutdown().await;
        });

        let request = RequestDescriptor::new(Operation::GetLocalBackupDir, Duration::from_secs(5));
        let err = transport(format!("http://{addr}"))
            .execute(&request)
            .await
            .unwrap_err();
        match err {
            BackupError::Api { status, body } => {
                assert_eq!(status.as_u16(), 502);
                assert!(body.is_empty());
            }
            other => panic!("意外的错误类型: {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_deadline_surfaces_as_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let mut request = RequestDescriptor::new(Operation::RefreshToken, Duration::from_secs(30));
        request.timeout = Duration::from_millis(200);

        let err = transport(format!("http://{addr}"))
            .execute(&request)
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "应为超时错误: {err:?}");
    }
}
