//! Logging bootstrap and the coded event log used by write pipelines.
//!
//! # Responsibility
//! - Initialize file-based rolling logs exactly once per process.
//! - Provide [`EventLog`], the leveled, numerically coded log collaborator.
//!
//! # Invariants
//! - Logging init is idempotent for the same level and directory.
//! - Logging initialization must not panic.
//! - Event codes are emitted verbatim; monitoring keys off them.

use crate::config::AppConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "slipways";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const MAX_LOG_FILES: usize = 5;
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;
const MAX_EVENT_MESSAGE_CHARS: usize = 512;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct LoggingState {
    level: &'static str,
    log_dir: PathBuf,
    _logger: LoggerHandle,
}

/// Leveled, coded log sink handed to write pipelines.
///
/// Codes form a flat namespace: 5000-5999 for validation and silent store
/// failures, 6600-6699 for caught faults.
pub trait EventLog {
    fn warn(&self, code: u32, message: &str);
    fn error(&self, code: u32, message: &str, cause: Option<&(dyn Error + 'static)>);
    fn info(&self, message: &str);
}

/// [`EventLog`] backed by the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct CoreEventLog {
    module: &'static str,
}

impl CoreEventLog {
    pub fn new(module: &'static str) -> Self {
        Self { module }
    }
}

impl Default for CoreEventLog {
    fn default() -> Self {
        Self::new("core")
    }
}

impl EventLog for CoreEventLog {
    fn warn(&self, code: u32, message: &str) {
        warn!("{}", format_event(Some(code), self.module, "warn", message, None));
    }

    fn error(&self, code: u32, message: &str, cause: Option<&(dyn Error + 'static)>) {
        let cause = cause.map_or_else(|| "none".to_string(), |err| err.to_string());
        error!(
            "{}",
            format_event(Some(code), self.module, "error", message, Some(cause.as_str()))
        );
    }

    fn info(&self, message: &str) {
        info!("{}", format_event(None, self.module, "ok", message, None));
    }
}

/// Renders one coded event as a single key=value line.
///
/// `cause` is appended only for error events; message and cause are flattened
/// and capped.
pub(crate) fn format_event(
    code: Option<u32>,
    module: &str,
    status: &str,
    message: &str,
    cause: Option<&str>,
) -> String {
    let mut line = match code {
        Some(code) => format!("event_id={code} module={module} status={status}"),
        None => format!("module={module} status={status}"),
    };
    line.push_str(" message=");
    line.push_str(&sanitize_message(message, MAX_EVENT_MESSAGE_CHARS));
    if let Some(cause) = cause {
        line.push_str(" cause=");
        line.push_str(&sanitize_message(cause, MAX_EVENT_MESSAGE_CHARS));
    }
    line
}

/// Initializes rolling file logging with level and directory.
///
/// # Errors
/// - Unsupported `level`.
/// - Empty, relative, or uncreatable `log_dir`.
/// - Re-initialization with a different level or directory.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(level)?;
    let log_dir = normalize_log_dir(log_dir)?;

    if let Some(state) = LOGGING_STATE.get() {
        return ensure_same_config(state, level, &log_dir);
    }

    let state = LOGGING_STATE.get_or_try_init(|| start_logger(level, &log_dir))?;
    // Another thread may have won the init race with a different config.
    ensure_same_config(state, level, &log_dir)
}

/// Initializes logging from a resolved [`AppConfig`].
///
/// Returns `Ok(false)` when the config carries no log directory.
pub fn init_from_config(config: &AppConfig) -> Result<bool, String> {
    match config.log_dir.as_deref() {
        Some(dir) => init_logging(&config.log_level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Returns `(level, log_dir)` when logging is active.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    LOGGING_STATE
        .get()
        .map(|state| (state.level, state.log_dir.clone()))
}

/// `debug` for debug builds, `info` for release builds.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(level: &'static str, log_dir: &Path) -> Result<LoggingState, String> {
    std::fs::create_dir_all(log_dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            log_dir.display()
        )
    })?;

    let logger = Logger::try_with_str(level)
        .map_err(|err| format!("invalid log level `{level}`: {err}"))?
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
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook_once();

    info!(
        "event=process_start module=core status=ok platform={} version={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION")
    );
    info!(
        "event=logging_init module=core status=ok level={} log_dir={}",
        level,
        log_dir.display()
    );

    Ok(LoggingState {
        level,
        log_dir: log_dir.to_path_buf(),
        _logger: logger,
    })
}

fn ensure_same_config(state: &LoggingState, level: &str, log_dir: &Path) -> Result<(), String> {
    if state.log_dir != log_dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            state.log_dir.display(),
            log_dir.display()
        ));
    }
    if state.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            state.level, level
        ));
    }
    Ok(())
}

fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

/// Flattens a message onto one line and caps its length.
pub(crate) fn sanitize_message(value: &str, max_chars: usize) -> String {
    let normalized = value.replace(['\n', '\r'], " ");
    let mut truncated = normalized.chars().take(max_chars).collect::<String>();
    if normalized.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}

#[cfg(test)]
mod tests {
    use super::{
        format_event, init_from_config, init_logging, logging_status, normalize_level,
        normalize_log_dir, sanitize_message, CoreEventLog, EventLog, MAX_EVENT_MESSAGE_CHARS,
    };
    use crate::repo::StoreError;
    use crate::config::AppConfig;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(suffix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "slipways-logging-{suffix}-{}-{nanos}",
            std::process::id()
        ))
    }

    #[test]
    fn normalize_level_accepts_known_values() {
        assert_eq!(normalize_level("ERROR").unwrap(), "error");
        assert_eq!(normalize_level(" warning ").unwrap(), "warn");
        assert!(normalize_level("loud").is_err());
    }

    #[test]
    fn normalize_log_dir_rejects_relative_and_empty_paths() {
        assert!(normalize_log_dir("logs/dev").unwrap_err().contains("absolute"));
        assert!(normalize_log_dir("  ").unwrap_err().contains("empty"));
    }

    #[test]
    fn sanitize_message_flattens_and_truncates() {
        let sanitized = sanitize_message("Port 'Kiel'\nat line\r2", 8);
        assert!(!sanitized.contains('\n'));
        assert!(!sanitized.contains('\r'));
        assert!(sanitized.ends_with("..."));
        assert_eq!(sanitize_message("short", 8), "short");
    }

    #[test]
    fn format_event_renders_code_module_and_status() {
        assert_eq!(
            format_event(Some(5000), "service", "warn", "Error occurred while POST Port", None),
            "event_id=5000 module=service status=warn message=Error occurred while POST Port"
        );
        assert_eq!(
            format_event(None, "core", "ok", "Added Slipway 'Nord'", None),
            "module=core status=ok message=Added Slipway 'Nord'"
        );
    }

    #[test]
    fn format_event_flattens_message_and_cause() {
        let line = format_event(
            Some(6666),
            "core",
            "error",
            "Unexpected error\noccurred",
            Some("record not found:\r\nabc"),
        );
        assert_eq!(
            line,
            "event_id=6666 module=core status=error message=Unexpected error occurred cause=record not found:  abc"
        );

        let long = "x".repeat(MAX_EVENT_MESSAGE_CHARS + 10);
        let capped = format_event(Some(5005), "core", "error", &long, Some("none"));
        assert!(capped.contains(&format!("message={}...", "x".repeat(MAX_EVENT_MESSAGE_CHARS))));
        assert!(capped.ends_with("cause=none"));
    }

    #[test]
    fn core_event_log_accepts_every_level() {
        let log = CoreEventLog::default();
        let cancelled = StoreError::Cancelled;
        let cause: &(dyn std::error::Error + 'static) = &cancelled;
        log.warn(5000, "Error occurred while POST Port");
        log.error(6666, "Unexpected error occurred while inserting Port 'Kiel'", Some(cause));
        log.error(5005, "Error occurred while inserting Port 'Kiel'", None);
        log.info("Added Slipway 'Nord' to Port 'Kiel'");
    }

    #[test]
    fn config_without_log_dir_skips_init() {
        assert_eq!(init_from_config(&AppConfig::default()), Ok(false));
    }

    #[test]
    fn init_logging_is_idempotent_and_rejects_conflicts() {
        let log_dir = unique_temp_dir("idempotent");
        let log_dir_str = log_dir.to_str().unwrap().to_string();
        let other_dir = unique_temp_dir("other");
        let other_dir_str = other_dir.to_str().unwrap().to_string();

        init_logging("info", &log_dir_str).expect("first init should succeed");
        init_logging("INFO", &log_dir_str).expect("same config should be idempotent");

        let level_error = init_logging("debug", &log_dir_str).unwrap_err();
        assert!(level_error.contains("refusing to switch"));
        let dir_error = init_logging("info", &other_dir_str).unwrap_err();
        assert!(dir_error.contains("refusing to switch"));

        let (level, dir) = logging_status().expect("logging should be active");
        assert_eq!(level, "info");
        assert_eq!(dir, log_dir);
    }
}
