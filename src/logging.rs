use crate::config::types::LogSettings;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, fmt, EnvFilter, Layer};

/// 初始化日志系统：info/error 两个按天轮转的文件 + 受 `RUST_LOG` 控制的控制台输出
///
/// 返回的 WorkerGuard 必须在程序运行期间保持存活，否则缓冲的日志会丢失
pub fn init_logging(settings: &LogSettings) -> Result<Vec<WorkerGuard>, Box<dyn std::error::Error>> {
    fs::create_dir_all(&settings.dir)?;

    let mut guards = Vec::new();

    let general_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("info")
        .filename_suffix("log")
        .max_log_files(settings.general_retention_days)
        .build(&settings.dir)?;
    let (general_non_blocking, general_guard) =
        tracing_appender::non_blocking(general_file_appender);
    guards.push(general_guard);

    let error_file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("error")
        .filename_suffix("log")
        .max_log_files(settings.error_retention_days)
        .build(&settings.dir)?;
    let (error_non_blocking, error_guard) = tracing_appender::non_blocking(error_file_appender);
    guards.push(error_guard);

    let (console_non_blocking, console_guard) = tracing_appender::non_blocking(std::io::stdout());
    guards.push(console_guard);

    // 文件日志禁用 ANSI 颜色
    let general_layer = fmt::layer()
        .with_writer(general_non_blocking)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| {
            *meta.level() != tracing::Level::ERROR
        }));

    let error_layer = fmt::layer()
        .with_writer(error_non_blocking)
        .with_ansi(false)
        .with_filter(filter::filter_fn(|meta| {
            *meta.level() == tracing::Level::ERROR
        }));

    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_writer(console_non_blocking)
        .with_filter(console_filter);

    tracing_subscriber::registry()
        .with(general_layer)
        .with(error_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guards)
}
