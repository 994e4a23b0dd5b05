use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing_appender::rolling::{RollingFileAppender, Rotation};

use crate::storage::LoggingConfig;

/// Logger that appends timestamped lines to a rotating log file
struct FileLogger {
    writer: Mutex<RollingFileAppender>,
    level: LevelFilter,
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format_line(Local::now(), record.level(), &record.args().to_string());
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
        }
    }

    fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

/// "2026-01-31 09:15:00 [INFO] message"
fn format_line(timestamp: DateTime<Local>, level: Level, message: &str) -> String {
    format!("{} [{}] {}", timestamp.format("%Y-%m-%d %H:%M:%S"), level, message)
}

/// Parse log level string to LevelFilter
pub fn parse_level(level_str: &str) -> LevelFilter {
    match level_str.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn, // Default to warn
    }
}

/// Install the global logger.
///
/// With a log file configured, records go to a daily rotated file.
/// Otherwise env_logger writes to stderr, honouring RUST_LOG.
pub fn init_logger(config: &LoggingConfig) -> Result<()> {
    match &config.file {
        Some(path) => init_file_logger(path, parse_level(&config.level)),
        None => env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(config.level.as_str()),
        )
        .try_init()
        .context("Failed to set global logger"),
    }
}

fn init_file_logger(log_file_path: &Path, level: LevelFilter) -> Result<()> {
    let dir = log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).context("Failed to create log directory")?;

    // Daily rotation, keep 3 files
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(3)
        .filename_prefix(
            log_file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| anyhow!("Invalid log file path {:?}", log_file_path))?,
        )
        .filename_suffix(
            log_file_path
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("log"),
        )
        .build(dir)
        .context("Failed to create rotating file appender")?;

    let logger = FileLogger {
        writer: Mutex::new(file_appender),
        level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(level);

    Ok(())
}
