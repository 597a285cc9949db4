//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start rolling file logs (mirrored to stderr) once per process.
//! - Report panics as `panic_captured` events.
//!
//! # Invariants
//! - Init is idempotent for identical level and directory.
//! - Re-initialization with a different level or directory is rejected.
//! - Init never panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info, LevelFilter};
use once_cell::sync::OnceCell;
use std::panic::PanicHookInfo;
use std::path::PathBuf;
use std::sync::Once;

const LOG_FILE_BASENAME: &str = "todolist";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const PANIC_PAYLOAD_LIMIT: usize = 160;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK: Once = Once::new();

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogSettings {
    level: LevelFilter,
    log_dir: PathBuf,
}

impl LogSettings {
    fn parse(level: &str, log_dir: &str) -> Result<Self, String> {
        let level = level
            .trim()
            .parse::<LevelFilter>()
            .map_err(|_| format!("unknown log level `{}`", level.trim()))?;

        let log_dir = PathBuf::from(log_dir.trim());
        if log_dir.is_relative() {
            return Err(format!(
                "log directory must be an absolute path, got `{}`",
                log_dir.display()
            ));
        }

        Ok(Self { level, log_dir })
    }

    fn ensure_same_as(&self, active: &LogSettings) -> Result<(), String> {
        if self == active {
            return Ok(());
        }
        Err(format!(
            "logging already runs at level={} dir={}; refusing to switch to level={} dir={}",
            spec_name(active.level),
            active.log_dir.display(),
            spec_name(self.level),
            self.log_dir.display()
        ))
    }
}

struct LoggingState {
    settings: LogSettings,
    _logger: LoggerHandle,
}

/// Starts logging at `level` into rolling files under `log_dir`.
///
/// Records at `info` and above are also written to stderr.
///
/// # Errors
/// - `level` is not a `log` level name (`off` included, case-insensitive).
/// - `log_dir` is empty, relative, or cannot be created.
/// - Logging is already active with other settings.
/// - The flexi_logger backend fails to start.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let requested = LogSettings::parse(level, log_dir)?;
    let state = LOGGING_STATE.get_or_try_init(|| start_logger(requested.clone()))?;
    requested.ensure_same_as(&state.settings)
}

/// Returns `(level, log_dir)` of the active logger, if any.
pub fn logging_status() -> Option<(LevelFilter, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.settings.level, state.settings.log_dir.clone()))
}

/// `debug` in debug builds, `info` in release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: LogSettings) -> Result<LoggingState, String> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            settings.log_dir.display()
        )
    })?;

    let spec = spec_name(settings.level);
    let logger = Logger::try_with_str(&spec)
        .map_err(|err| format!("invalid log level `{spec}`: {err}"))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .duplicate_to_stderr(Duplicate::Info)
        .format_for_files(flexi_logger::detailed_format)
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    PANIC_HOOK.call_once(install_panic_hook);

    info!(
        "event=logging_init module=logging status=ok level={spec} log_dir={} version={}",
        settings.log_dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(LoggingState {
        settings,
        _logger: logger,
    })
}

/// Lowercase level name, as flexi_logger specs and log lines spell it.
fn spec_name(level: LevelFilter) -> String {
    level.to_string().to_ascii_lowercase()
}

fn install_panic_hook() {
    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map_or_else(|| "unknown".to_string(), ToString::to_string);
        error!(
            "event=panic_captured module=logging status=error location={location} payload={:?}",
            panic_payload(panic_info, PANIC_PAYLOAD_LIMIT)
        );
        previous_hook(panic_info);
    }));
}

/// The panic message capped at `limit` chars. Item text can end up in a
/// payload, so it is logged through `{:?}`, which keeps it on one line.
fn panic_payload(info: &PanicHookInfo<'_>, limit: usize) -> String {
    let payload = info.payload();
    let message = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string payload>");
    cap_chars(message, limit)
}

fn cap_chars(message: &str, limit: usize) -> String {
    match message.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &message[..cut]),
        None => message.to_string(),
    }
}
