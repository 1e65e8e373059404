//! Rolling file logs for the inventory core.
//!
//! One logger per process, started from `CoreConfig`. Events are
//! `key=value` lines through the `log` facade; `flexi_logger` writes them
//! to `<log_dir>/cardealer*.log`.

use crate::config::CoreConfig;
use flexi_logger::{
    Cleanup, Criterion, FileSpec, FlexiLoggerError, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "cardealer";
const ROTATE_AT_BYTES: u64 = 10 * 1024 * 1024;
const KEEP_FILES: usize = 5;
const PANIC_TEXT_LIMIT: usize = 160;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();

struct ActiveLogger {
    level: LevelFilter,
    dir: PathBuf,
    _handle: LoggerHandle,
}

pub type LoggingResult<T> = Result<T, LoggingError>;

#[derive(Debug)]
pub enum LoggingError {
    /// The log directory could not be created.
    CreateDir { dir: PathBuf, source: io::Error },
    /// `flexi_logger` refused the specification or file sink.
    Backend(FlexiLoggerError),
    /// A logger with different settings already runs in this process.
    Conflict {
        active_level: LevelFilter,
        active_dir: PathBuf,
    },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir { dir, source } => {
                write!(f, "cannot create log directory {}: {source}", dir.display())
            }
            Self::Backend(err) => write!(f, "logger backend: {err}"),
            Self::Conflict {
                active_level,
                active_dir,
            } => write!(
                f,
                "logging already runs at {active_level} in {}",
                active_dir.display()
            ),
        }
    }
}

impl Error for LoggingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::CreateDir { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
            Self::Conflict { .. } => None,
        }
    }
}

impl From<FlexiLoggerError> for LoggingError {
    fn from(value: FlexiLoggerError) -> Self {
        Self::Backend(value)
    }
}

/// Starts file logging when `config.log_dir` is set.
///
/// Returns `false` without touching the logger when no directory is
/// configured.
pub fn init_from_config(config: &CoreConfig) -> LoggingResult<bool> {
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(config.log_level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Starts the process logger at `level`, writing into `log_dir` unchanged.
///
/// Calling again with the same pair is a no-op; any other pair is a
/// `LoggingError::Conflict`.
pub fn init_logging(level: LevelFilter, log_dir: &Path) -> LoggingResult<()> {
    let active = ACTIVE.get_or_try_init(|| start(level, log_dir))?;
    if active.level == level && active.dir.as_path() == log_dir {
        Ok(())
    } else {
        Err(LoggingError::Conflict {
            active_level: active.level,
            active_dir: active.dir.clone(),
        })
    }
}

/// Level and directory of the running logger, if any.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    ACTIVE.get().map(|active| (active.level, active.dir.clone()))
}

/// `Debug` for debug builds, `Info` for release builds.
pub fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

fn start(level: LevelFilter, dir: &Path) -> LoggingResult<ActiveLogger> {
    std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let handle = Logger::try_with_str(level.as_str().to_ascii_lowercase())?
        .log_to_file(FileSpec::default().directory(dir).basename(LOG_BASENAME))
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    log_panics();
    info!(
        "event=core_init module=core status=ok version={} os={} level={level} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        dir.display()
    );

    Ok(ActiveLogger {
        level,
        dir: dir.to_path_buf(),
        _handle: handle,
    })
}

// Runs once: only reached from the `ACTIVE` initializer.
fn log_panics() {
    let chained = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let at = info
            .location()
            .map_or_else(|| "unknown".to_string(), |loc| format!("{}:{}", loc.file(), loc.line()));
        let text = info
            .payload()
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| info.payload().downcast_ref::<String>().map(String::as_str))
            .unwrap_or("non-string panic payload");
        error!(
            "event=panic module=core status=error location={at} payload={}",
            one_line(text, PANIC_TEXT_LIMIT)
        );
        chained(info);
    }));
}

fn one_line(text: &str, limit: usize) -> String {
    let mut flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(limit)
        .collect();
    if text.chars().count() > limit {
        flat.push_str("...");
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::{init_logging, logging_status, one_line, LoggingError};
    use log::LevelFilter;
    use std::path::PathBuf;

    #[cfg(unix)]
    fn log_dir_name() -> std::ffi::OsString {
        use std::os::unix::ffi::OsStringExt;
        // Not valid UTF-8: must reach the logger byte-for-byte.
        let mut name = b"cardealer-logs-".to_vec();
        name.extend_from_slice(&[0xff, 0xfe]);
        name.extend_from_slice(std::process::id().to_string().as_bytes());
        std::ffi::OsString::from_vec(name)
    }

    #[cfg(not(unix))]
    fn log_dir_name() -> std::ffi::OsString {
        format!("cardealer-logs-{}", std::process::id()).into()
    }

    #[test]
    fn one_line_flattens_and_truncates() {
        assert_eq!(one_line("a\nb\rc", 10), "a b c");
        assert_eq!(one_line("abcdefgh", 3), "abc...");
    }

    #[test]
    fn init_uses_given_path_and_rejects_other_settings() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir: PathBuf = dir.path().join(log_dir_name());

        init_logging(LevelFilter::Info, &log_dir).unwrap();
        init_logging(LevelFilter::Info, &log_dir).unwrap();

        let (level, active_dir) = logging_status().unwrap();
        assert_eq!(level, LevelFilter::Info);
        assert_eq!(active_dir, log_dir);
        assert!(log_dir.is_dir());

        let err = init_logging(LevelFilter::Debug, &log_dir).unwrap_err();
        assert!(matches!(err, LoggingError::Conflict { .. }));

        let other = dir.path().join("elsewhere");
        let err = init_logging(LevelFilter::Info, &other).unwrap_err();
        assert!(matches!(
            err,
            LoggingError::Conflict { active_dir, .. } if active_dir == log_dir
        ));
    }
}
