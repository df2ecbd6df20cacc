use client_core::error::Result;
use serde::Serialize;

/// 设置日志记录系统
///
/// - 库代码只使用 tracing 宏记录日志
/// - 支持 RUST_LOG 环境变量控制日志级别
/// - 默认输出到stderr，stdout 只留给命令结果
/// - 设置 BACKUP_LOG_FILE 时输出到文件，使用详细格式
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_file = std::env::var("BACKUP_LOG_FILE").ok().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| eprintln!("无法打开日志文件 {path}: {e}"))
            .ok()
    });

    if let Some(file) = log_file {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::sync::Mutex::new(file))
            .with_target(true)
            .with_thread_names(true)
            .with_line_number(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false)
            .without_time()
            .compact()
            .init();
    }
}

/// 以缩进 JSON 输出命令结果
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
