//! Logging Infrastructure
//!
//! 终端输出始终开启；设置了日志目录时额外写入按天滚动的文件。

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 日志文件名前缀
const LOG_FILE_PREFIX: &str = "ledger-server";

/// Initialize the logger with optional file output
///
/// - `log_level`: 默认级别，`RUST_LOG` 优先
/// - `json`: 文件日志是否使用 JSON 格式
/// - `log_dir`: 日志目录，不存在时自动创建，创建失败只输出到终端
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_writer = log_dir.and_then(|dir| {
        let path = Path::new(dir);
        match std::fs::create_dir_all(path) {
            Ok(()) => Some(tracing_appender::rolling::daily(path, LOG_FILE_PREFIX)),
            Err(e) => {
                eprintln!("Failed to create log directory {}: {}", dir, e);
                None
            }
        }
    });

    let registry = tracing_subscriber::registry().with(filter).with(stdout_layer);

    // try_init: 测试中可能被多次调用
    let result = match file_writer {
        Some(writer) if json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(writer),
            )
            .try_init(),
        Some(writer) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(writer),
            )
            .try_init(),
        None => registry.try_init(),
    };

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}
