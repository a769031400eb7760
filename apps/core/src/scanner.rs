use sysinfo::{ProcessRefreshKind, System, UpdateKind};

use crate::handles;
use crate::model::ProcessSnapshot;

pub trait ProcessProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// One consistent-enough view of the live process table. Processes that
    /// vanish or refuse inspection mid-scan contribute nothing; a scan never
    /// fails as a whole.
    fn snapshot(&self) -> Vec<ProcessSnapshot>;
}

#[derive(Debug, Default)]
pub struct LiveProcessProvider;

impl LiveProcessProvider {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessProvider for LiveProcessProvider {
    fn provider_name(&self) -> &'static str {
        "live-process-table"
    }

    fn snapshot(&self) -> Vec<ProcessSnapshot> {
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessRefreshKind::new()
                .with_exe(UpdateKind::Always)
                .with_cwd(UpdateKind::Always),
        );

        let mut snapshots: Vec<ProcessSnapshot> = system
            .processes()
            .values()
            .map(|process| {
                let pid = process.pid().as_u32();
                // Open-file failures are isolated per process; the snapshot
                // stays eligible for working-directory matching.
                let open_files = handles::open_file_paths(pid).unwrap_or_default();
                ProcessSnapshot {
                    pid,
                    start_time: process.start_time(),
                    name: process.name().to_string(),
                    exe: process
                        .exe()
                        .map(|path| path.to_string_lossy().into_owned()),
                    cwd: process
                        .cwd()
                        .map(|path| path.to_string_lossy().into_owned()),
                    open_files,
                }
            })
            .collect();

        // The process table is a map; pin enumeration order so match output
        // is stable across identical scans.
        snapshots.sort_by_key(|snapshot| snapshot.pid);
        snapshots
    }
}

pub struct FixtureProvider {
    snapshots: Vec<ProcessSnapshot>,
}

impl FixtureProvider {
    pub fn from_snapshots(snapshots: Vec<ProcessSnapshot>) -> Self {
        Self { snapshots }
    }

    pub fn deterministic_fixture() -> Self {
        Self {
            snapshots: vec![
                ProcessSnapshot::new(101, 1_700_000_000, "editor")
                    .with_exe("/usr/bin/editor")
                    .with_cwd("/home/dev/notes")
                    .with_open_files(&["/home/dev/notes/draft.md", "/home/dev/notes/todo.md"]),
                ProcessSnapshot::new(202, 1_700_000_100, "archiver")
                    .with_exe("/usr/bin/archiver")
                    .with_cwd("/var/backups")
                    .with_open_files(&["/var/backups/daily.tar"]),
                ProcessSnapshot::new(303, 1_700_000_200, "watcher")
                    .with_exe("/usr/bin/watcher")
                    .with_cwd("/home/dev/notes"),
            ],
        }
    }
}

impl ProcessProvider for FixtureProvider {
    fn provider_name(&self) -> &'static str {
        "fixture"
    }

    fn snapshot(&self) -> Vec<ProcessSnapshot> {
        self.snapshots.clone()
    }
}
