use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use chrono::Local;

const LOG_FILE_NAME: &str = "usedby.log";
const ARCHIVE_PREFIX: &str = "usedby-";
const MAX_LOG_BYTES: u64 = 1_000_000;
const MAX_ARCHIVES: usize = 5;

static LOGGER: OnceLock<Logger> = OnceLock::new();
static PANIC_HOOK_INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    fn from_env() -> Self {
        match std::env::var("USEDBY_LOG").as_deref() {
            Ok("error") => Self::Error,
            Ok("warn") => Self::Warn,
            _ => Self::Info,
        }
    }
}

struct Logger {
    file: Mutex<File>,
    min_level: Level,
}

pub fn logs_dir() -> PathBuf {
    crate::config::stable_app_data_dir().join("logs")
}

/// Opens (and rotates) the log file. stdout is reserved for the host
/// protocol, so everything diagnostic lands here.
pub fn init() -> Result<(), std::io::Error> {
    let dir = logs_dir();
    fs::create_dir_all(&dir)?;
    let log_path = dir.join(LOG_FILE_NAME);
    rotate_if_needed(&log_path, &dir)?;

    let file = OpenOptions::new().create(true).append(true).open(&log_path)?;
    let _ = LOGGER.set(Logger {
        file: Mutex::new(file),
        min_level: Level::from_env(),
    });

    install_panic_hook();
    Ok(())
}

pub fn info(message: &str) {
    write_line(Level::Info, message);
}

pub fn warn(message: &str) {
    write_line(Level::Warn, message);
}

pub fn error(message: &str) {
    write_line(Level::Error, message);
}

fn write_line(level: Level, message: &str) {
    let Some(logger) = LOGGER.get() else {
        return;
    };
    if level < logger.min_level {
        return;
    }
    let Ok(mut file) = logger.file.lock() else {
        return;
    };

    let stamp = Local::now().format("%Y-%m-%dT%H:%M:%S%z");
    let _ = writeln!(file, "[{stamp}] [{}] {message}", level.label());
    let _ = file.flush();
}

fn rotate_if_needed(log_path: &Path, dir: &Path) -> Result<(), std::io::Error> {
    let size = match fs::metadata(log_path) {
        Ok(meta) => meta.len(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };
    if size < MAX_LOG_BYTES {
        return Ok(());
    }

    let stamp = Local::now().format("%Y%m%d%H%M%S");
    fs::rename(log_path, dir.join(format!("{ARCHIVE_PREFIX}{stamp}.log")))?;

    let mut archives: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(ARCHIVE_PREFIX) && name.ends_with(".log"))
        })
        .collect();
    archives.sort();
    for stale in archives.iter().take(archives.len().saturating_sub(MAX_ARCHIVES)) {
        let _ = fs::remove_file(stale);
    }
    Ok(())
}

fn install_panic_hook() {
    let _ = PANIC_HOOK_INSTALLED.get_or_init(|| {
        let prior = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let location = panic_info
                .location()
                .map(|l| format!("{}:{}", l.file(), l.line()))
                .unwrap_or_else(|| "unknown".to_string());
            let payload = panic_info
                .payload()
                .downcast_ref::<&str>()
                .map(|s| (*s).to_string())
                .or_else(|| panic_info.payload().downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "panic payload unavailable".to_string());
            error(&format!("panic at {location}: {payload}"));
            prior(panic_info);
        }));
    });
}
