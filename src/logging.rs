//! File logging for the card.
//!
//! The terminal is owned by the renderer, so log records go to a rotating
//! file under the configured directory instead of stderr.
//!
//! # Invariants
//! - Initialization happens at most once per process.
//! - A second call with the same level and directory is a no-op.
//! - A second call with a different level or directory is rejected.

use crate::error::{CardError, Result};
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "envelope3d";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 2 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Starts the file logger at `level` inside `log_dir`.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<()> {
    let level = normalize_level(level)?;

    let state = LOGGING_STATE.get_or_try_init(|| -> Result<LoggingState> {
        std::fs::create_dir_all(log_dir).map_err(|err| {
            CardError::Logging(format!(
                "failed to create log directory `{}`: {err}",
                log_dir.display()
            ))
        })?;

        let logger = Logger::try_with_str(level)
            .map_err(|err| CardError::Logging(format!("invalid log spec `{level}`: {err}")))?
            .log_to_file(FileSpec::default().directory(log_dir).basename(LOG_FILE_BASENAME))
            .rotate(
                Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                Naming::Numbers,
                Cleanup::KeepLogFiles(MAX_LOG_FILES),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| CardError::Logging(format!("failed to start logger: {err}")))?;

        info!(
            "event=app_start version={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            level,
            log_dir.display()
        );

        Ok(LoggingState {
            level,
            log_dir: log_dir.to_path_buf(),
            _logger: logger,
        })
    })?;

    if state.log_dir != log_dir {
        return Err(CardError::Logging(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        )));
    }
    if state.level != level {
        return Err(CardError::Logging(format!(
            "logging already initialized with level `{}`; refusing to switch to `{level}`",
            state.level
        )));
    }

    Ok(())
}

/// Maps user input onto one of the five `log` levels.
pub fn normalize_level(level: &str) -> Result<&'static str> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(CardError::InvalidLogLevel(other.to_string())),
    }
}
