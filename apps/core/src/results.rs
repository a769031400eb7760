use std::time::{Duration, UNIX_EPOCH};

use chrono::{DateTime, Local};

use crate::actuator::ResolvedProcess;
use crate::contract::{ActionToken, ContextPayload, ResultDto};
use crate::model::MatchRecord;
use crate::query_mode::MatchMode;

const ICON_PATH: &str = "assets/usedby.png";
const MISSING_FIELD: &str = "-";

pub fn help_result() -> ResultDto {
    ResultDto {
        title: "Type a file or folder path to see the processes using it".to_string(),
        subtitle: "Example: /path/to/file OR :ifr /path/to/file".to_string(),
        icon: ICON_PATH.to_string(),
        action: None,
        context: None,
    }
}

pub fn no_match_result(term: &str, mode: &MatchMode) -> ResultDto {
    let labels = mode.active_modifier_labels();
    let title = if labels.is_empty() {
        format!("There are no processes using '{term}'")
    } else {
        format!(
            "There are no processes using '{term}' with {}",
            join_with_final_and(&labels)
        )
    };
    ResultDto {
        title,
        subtitle: String::new(),
        icon: ICON_PATH.to_string(),
        action: None,
        context: None,
    }
}

pub fn invalid_pattern_result(term: &str, detail: &str) -> ResultDto {
    ResultDto {
        title: format!("'{term}' is not a valid regular expression"),
        subtitle: detail.to_string(),
        icon: ICON_PATH.to_string(),
        action: None,
        context: None,
    }
}

pub fn stale_identity_result(pid: u32) -> ResultDto {
    ResultDto {
        title: format!("Process with PID {pid} not found"),
        subtitle: "It exited or was replaced since the result was produced".to_string(),
        icon: ICON_PATH.to_string(),
        action: None,
        context: None,
    }
}

pub fn match_result(record: &MatchRecord) -> ResultDto {
    let cwd = record.cwd.as_deref().unwrap_or(MISSING_FIELD);
    let exe = record.exe.as_deref().unwrap_or(MISSING_FIELD);
    ResultDto {
        title: format!("{} ({})", record.name, record.pid),
        subtitle: format!(
            "PATH: {} | CWD: {} | EXE: {} | TIME: {}",
            record.match_path,
            cwd,
            exe,
            format_start_time(record.start_time)
        ),
        icon: ICON_PATH.to_string(),
        // No default action when the working directory was unreadable.
        action: record.cwd.as_deref().map(|path| ActionToken::OpenWorkingDirectory {
            path: path.to_string(),
        }),
        context: Some(ContextPayload {
            pid: record.pid,
            start_time: record.start_time,
            match_path: record.match_path.clone(),
        }),
    }
}

/// Follow-up entries for one matched process. The process was re-resolved
/// against the stored identity just before this is built.
pub fn context_menu(payload: &ContextPayload, process: &ResolvedProcess) -> Vec<ResultDto> {
    let cwd = process.cwd.as_deref().unwrap_or(MISSING_FIELD);
    let exe = process.exe.as_deref().unwrap_or(MISSING_FIELD);
    let start_time = format_start_time(process.start_time);

    vec![
        entry(
            "Open CWD",
            cwd,
            Some(ActionToken::OpenWorkingDirectory {
                path: cwd.to_string(),
            }),
        ),
        copy_entry("Copy Match Path", &payload.match_path),
        copy_entry("Copy Name", &process.name),
        copy_entry("Copy PID", &process.pid.to_string()),
        copy_entry("Copy CWD", cwd),
        copy_entry("Copy Exe", exe),
        copy_entry("Copy Create Time", &start_time),
        entry(
            "Terminate Process",
            &process.name,
            Some(ActionToken::TerminateProcess {
                pid: process.pid,
                start_time: process.start_time,
            }),
        ),
        entry(
            "Kill Process",
            &process.name,
            Some(ActionToken::KillProcess {
                pid: process.pid,
                start_time: process.start_time,
            }),
        ),
    ]
}

fn entry(title: &str, subtitle: &str, action: Option<ActionToken>) -> ResultDto {
    ResultDto {
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        icon: ICON_PATH.to_string(),
        action,
        context: None,
    }
}

fn copy_entry(title: &str, text: &str) -> ResultDto {
    entry(
        title,
        text,
        Some(ActionToken::Copy {
            text: text.to_string(),
        }),
    )
}

/// Local-time ISO-8601 with the UTC offset, e.g. `2026-08-07T09:15:02+0200`.
pub fn format_start_time(epoch_secs: u64) -> String {
    let timestamp: DateTime<Local> = (UNIX_EPOCH + Duration::from_secs(epoch_secs)).into();
    timestamp.format("%Y-%m-%dT%H:%M:%S%z").to_string()
}

fn join_with_final_and(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}
