use std::fmt::{Display, Formatter};
use std::path::Path;

use sysinfo::{Pid, Process, ProcessRefreshKind, Signal, System, UpdateKind};

use crate::logging;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorError {
    /// The pid no longer exists, or it belongs to a different process than
    /// the one the identity was captured from (recycled pid).
    StaleIdentity { pid: u32 },
    Clipboard(String),
    Open(String),
    Signal { pid: u32, detail: String },
}

impl Display for ActuatorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StaleIdentity { pid } => {
                write!(f, "process {pid} is gone or its start time changed")
            }
            Self::Clipboard(detail) => write!(f, "clipboard error: {detail}"),
            Self::Open(detail) => write!(f, "open error: {detail}"),
            Self::Signal { pid, detail } => write!(f, "signal to {pid} failed: {detail}"),
        }
    }
}

impl std::error::Error for ActuatorError {}

/// Live attributes of a process re-read after an identity check passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProcess {
    pub pid: u32,
    pub start_time: u64,
    pub name: String,
    pub exe: Option<String>,
    pub cwd: Option<String>,
}

/// Re-reads the process and verifies the stored start time against the live
/// one. Every mutating or informational follow-up goes through this check
/// first, so a recycled pid is never acted upon.
pub fn resolve(pid: u32, start_time: u64) -> Result<ResolvedProcess, ActuatorError> {
    with_live_process(pid, start_time, |process| ResolvedProcess {
        pid,
        start_time,
        name: process.name().to_string(),
        exe: process.exe().map(|path| path.to_string_lossy().into_owned()),
        cwd: process.cwd().map(|path| path.to_string_lossy().into_owned()),
    })
}

/// Graceful stop request. Falls back to a forceful kill on platforms that
/// cannot deliver a termination signal.
pub fn terminate(pid: u32, start_time: u64) -> Result<(), ActuatorError> {
    with_live_process(pid, start_time, |process| match process.kill_with(Signal::Term) {
        Some(true) => Ok(()),
        Some(false) => Err(ActuatorError::Signal {
            pid,
            detail: "terminate request was rejected".to_string(),
        }),
        None => {
            if process.kill() {
                Ok(())
            } else {
                Err(ActuatorError::Signal {
                    pid,
                    detail: "kill fallback was rejected".to_string(),
                })
            }
        }
    })?
}

pub fn kill(pid: u32, start_time: u64) -> Result<(), ActuatorError> {
    with_live_process(pid, start_time, |process| {
        if process.kill() {
            Ok(())
        } else {
            Err(ActuatorError::Signal {
                pid,
                detail: "kill request was rejected".to_string(),
            })
        }
    })?
}

pub fn copy(text: &str) -> Result<(), ActuatorError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|error| ActuatorError::Clipboard(error.to_string()))?;
    clipboard
        .set_text(text.to_string())
        .map_err(|error| ActuatorError::Clipboard(error.to_string()))
}

/// Opens the directory in the host file manager. A directory that no longer
/// exists is logged and skipped; returns whether the open was issued.
pub fn open_working_directory(path: &str) -> Result<bool, ActuatorError> {
    if !Path::new(path).exists() {
        logging::warn(&format!("working directory does not exist: {path}"));
        return Ok(false);
    }
    open::that(path)
        .map(|_| true)
        .map_err(|error| ActuatorError::Open(error.to_string()))
}

fn with_live_process<T>(
    pid: u32,
    start_time: u64,
    read: impl FnOnce(&Process) -> T,
) -> Result<T, ActuatorError> {
    let sys_pid = Pid::from_u32(pid);
    let mut system = System::new();
    let refresh = ProcessRefreshKind::new()
        .with_exe(UpdateKind::Always)
        .with_cwd(UpdateKind::Always);
    if !system.refresh_process_specifics(sys_pid, refresh) {
        return Err(ActuatorError::StaleIdentity { pid });
    }

    let process = system
        .process(sys_pid)
        .ok_or(ActuatorError::StaleIdentity { pid })?;
    if process.start_time() != start_time {
        return Err(ActuatorError::StaleIdentity { pid });
    }

    Ok(read(process))
}
