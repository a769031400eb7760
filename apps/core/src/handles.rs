use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleError {
    /// Open-file enumeration is not available on this platform; callers fall
    /// back to working-directory matching only.
    Unsupported,
    Read(String),
}

impl Display for HandleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "open-file enumeration unsupported on this platform"),
            Self::Read(detail) => write!(f, "open-file read failed: {detail}"),
        }
    }
}

impl std::error::Error for HandleError {}

/// Paths of the regular files and directories the process currently holds
/// open. Sockets, pipes and anonymous inodes are not paths and are skipped.
#[cfg(target_os = "linux")]
pub fn open_file_paths(pid: u32) -> Result<Vec<String>, HandleError> {
    use procfs::process::{FDTarget, Process};

    let process =
        Process::new(pid as i32).map_err(|error| HandleError::Read(error.to_string()))?;
    let descriptors = process
        .fd()
        .map_err(|error| HandleError::Read(error.to_string()))?;

    let mut paths = Vec::new();
    for descriptor in descriptors.flatten() {
        if let FDTarget::Path(path) = descriptor.target {
            paths.push(path.to_string_lossy().into_owned());
        }
    }
    Ok(paths)
}

#[cfg(not(target_os = "linux"))]
pub fn open_file_paths(_pid: u32) -> Result<Vec<String>, HandleError> {
    Err(HandleError::Unsupported)
}
