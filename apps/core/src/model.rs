/// Point-in-time view of one process, captured during a scan and discarded
/// once the response is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub start_time: u64,
    pub name: String,
    pub exe: Option<String>,
    pub cwd: Option<String>,
    pub open_files: Vec<String>,
}

impl ProcessSnapshot {
    pub fn new(pid: u32, start_time: u64, name: &str) -> Self {
        Self {
            pid,
            start_time,
            name: name.to_string(),
            exe: None,
            cwd: None,
            open_files: Vec::new(),
        }
    }

    pub fn with_exe(mut self, exe: &str) -> Self {
        self.exe = Some(exe.to_string());
        self
    }

    pub fn with_cwd(mut self, cwd: &str) -> Self {
        self.cwd = Some(cwd.to_string());
        self
    }

    pub fn with_open_files(mut self, open_files: &[&str]) -> Self {
        self.open_files = open_files.iter().map(|f| f.to_string()).collect();
        self
    }
}

/// One matched (process, path) pair. `match_path` is the path that satisfied
/// the query, which differs from `cwd` when the hit came from an open file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub pid: u32,
    pub start_time: u64,
    pub name: String,
    pub exe: Option<String>,
    pub cwd: Option<String>,
    pub match_path: String,
}

impl MatchRecord {
    pub fn from_snapshot(snapshot: &ProcessSnapshot, match_path: &str) -> Self {
        Self {
            pid: snapshot.pid,
            start_time: snapshot.start_time,
            name: snapshot.name.clone(),
            exe: snapshot.exe.clone(),
            cwd: snapshot.cwd.clone(),
            match_path: match_path.to_string(),
        }
    }
}

/// Canonical comparable form of a path: separators collapsed to forward
/// slashes, optionally case-folded. Applied to both sides of every exact
/// comparison so comparisons stay symmetric.
pub fn normalize_path(path: &str, fold_case: bool) -> String {
    let normalized = path.replace('\\', "/");
    if fold_case {
        normalized.to_lowercase()
    } else {
        normalized
    }
}
