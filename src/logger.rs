//! 日志初始化
//!
//! 控制台输出受 `RUST_LOG` 控制；ERROR 级别的日志额外追加写入错误日志文件

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// 只记录 ERROR 级别、以追加方式写入文件的日志层
pub fn error_file_layer<S>(log_file_path: &str) -> Result<impl Layer<S>>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)
        .with_context(|| format!("无法打开日志文件: {}", log_file_path))?;

    Ok(fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_filter(LevelFilter::ERROR))
}

/// 初始化全局日志
pub fn init(error_log_file: &str, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_filter(env_filter))
        .with(error_file_layer(error_log_file)?)
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{error, info};

    #[test]
    fn test_only_errors_are_appended() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("error.log");
        std::fs::write(&path, "earlier run\n").unwrap();
        let path_str = path.to_str().unwrap();

        let subscriber = tracing_subscriber::registry().with(error_file_layer(path_str).unwrap());
        tracing::subscriber::with_default(subscriber, || {
            info!("progress message");
            error!("Error parsing XML file: broken.xml");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("earlier run\n"));
        assert!(content.contains("Error parsing XML file: broken.xml"));
        assert!(!content.contains("progress message"));
    }
}
