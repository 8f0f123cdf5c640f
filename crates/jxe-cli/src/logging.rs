use std::env;
use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::Once;

use chrono::SecondsFormat;
use jxe_core::config::LoggingConfig;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_DIR_NAME: &str = ".jxe_logs";
pub const APPLICATION_LOG: &str = "application.log";
pub const CRASH_LOG: &str = "crash.log";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("no home directory for logs; set logging.log_dir")]
    NoLogDir,

    #[error("failed to open log file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("invalid logging.level: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error(transparent)]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

pub fn resolve_home_dir() -> Option<PathBuf> {
    dirs::home_dir()
        .or_else(|| non_empty_env("HOME"))
        .or_else(|| non_empty_env("USERPROFILE"))
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

pub fn resolve_log_dir(config: &LoggingConfig) -> Option<PathBuf> {
    config
        .log_dir
        .clone()
        .or_else(|| resolve_home_dir().map(|home| home.join(LOG_DIR_NAME)))
}

/// Installs the global subscriber and the crash hook. Warnings and errors go
/// to stderr; everything the filter lets through goes to `application.log`.
pub fn init(config: &LoggingConfig) -> Result<PathBuf, LoggingError> {
    let dir = resolve_log_dir(config).ok_or(LoggingError::NoLogDir)?;
    let app_log = dir.join(APPLICATION_LOG);
    let file = open_append(&app_log).map_err(|source| LoggingError::Open {
        path: app_log.clone(),
        source,
    })?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .with_filter(LevelFilter::WARN),
        )
        .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        .try_init()?;

    install_crash_hook(dir.join(CRASH_LOG));
    tracing::info!(dir = %dir.display(), "logging initialized");
    Ok(dir)
}

fn install_crash_hook(crash_log: PathBuf) {
    static CRASH_HOOK: Once = Once::new();
    CRASH_HOOK.call_once(move || {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| format!("{}:{}", loc.file(), loc.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            let message = format!("panic at {location}: {payload}");
            tracing::error!("{message}");
            let _ = append_crash_entry(&crash_log, &message);
            previous(info);
        }));
    });
}

/// Records a failure that happened before `init` could run.
pub fn write_bootstrap_crash_log(message: &str) -> io::Result<PathBuf> {
    let dir = resolve_home_dir()
        .map(|home| home.join(LOG_DIR_NAME))
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
    let path = dir.join(CRASH_LOG);
    append_crash_entry(&path, message)?;
    Ok(path)
}

pub fn append_crash_entry(path: &Path, message: &str) -> io::Result<()> {
    let mut file = open_append(path)?;
    writeln!(file, "{}", crash_entry(message))
}

fn crash_entry(message: &str) -> String {
    let stamp = chrono::Local::now().to_rfc3339_opts(SecondsFormat::Secs, false);
    format!("{stamp} [CRASH] {message}")
}

fn open_append(path: &Path) -> io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn configured_log_dir_wins_over_home() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            log_dir: Some(PathBuf::from("/var/log/jxe")),
        };
        assert_eq!(resolve_log_dir(&config), Some(PathBuf::from("/var/log/jxe")));
    }

    #[test]
    fn default_log_dir_sits_under_home() {
        let Some(home) = resolve_home_dir() else {
            return;
        };
        assert_eq!(
            resolve_log_dir(&LoggingConfig::default()),
            Some(home.join(LOG_DIR_NAME))
        );
    }

    #[test]
    fn crash_entries_append_with_timestamp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("logs").join(CRASH_LOG);

        append_crash_entry(&path, "first").expect("append");
        append_crash_entry(&path, "second").expect("append");

        let text = fs::read_to_string(&path).expect("read");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" [CRASH] first"));
        assert!(lines[1].ends_with(" [CRASH] second"));

        let stamp = lines[0].split(' ').next().expect("timestamp");
        assert!(chrono::DateTime::parse_from_rfc3339(stamp).is_ok());
    }
}
