//! File-based logging. The terminal belongs to the UI, so nothing is
//! written to stdout or stderr while it runs.

use crate::error::PortfolioError;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use std::path::Path;

const LOG_FILE_BASENAME: &str = "portfolio-explorer";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

/// Start logging to a rotating file under `log_dir`.
///
/// The returned handle must be kept alive for the life of the process;
/// dropping it flushes and stops the logger.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, PortfolioError> {
    std::fs::create_dir_all(log_dir)?;

    let handle = Logger::try_with_str(level)
        .map_err(|err| PortfolioError::Logging(format!("invalid log level `{level}`: {err}")))?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| PortfolioError::Logging(format!("failed to start logger: {err}")))?;

    info!(
        "event=app_start version={} platform={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        level,
        log_dir.display()
    );
    Ok(handle)
}
