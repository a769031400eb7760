use usedby_core::config::Config;
use usedby_core::contract::ActionToken;
use usedby_core::core_service::CoreService;
use usedby_core::model::ProcessSnapshot;
use usedby_core::scanner::FixtureProvider;

fn fixture_service() -> CoreService {
    CoreService::with_provider(
        Config::default(),
        Box::new(FixtureProvider::deterministic_fixture()),
    )
    .unwrap()
}

#[test]
fn exact_query_matches_open_file() {
    let results = fixture_service().query("/home/dev/notes/draft.md");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "editor (101)");
    let context = results[0].context.as_ref().unwrap();
    assert_eq!(context.match_path, "/home/dev/notes/draft.md");
}

#[test]
fn case_insensitive_query_matches_differently_cased_path() {
    let results = fixture_service().query(":i /HOME/DEV/NOTES/DRAFT.MD");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "editor (101)");
}

#[test]
fn folder_check_finds_process_by_working_directory() {
    // watcher has no open files; only the :f pass can reach it.
    let results = fixture_service().query(":f /home/dev/notes");
    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"watcher (303)"), "titles: {titles:?}");
}

#[test]
fn regex_query_matches_once_per_process() {
    let results = fixture_service().query(":r notes/.*\\.md$");
    assert_eq!(results.len(), 1);
    let context = results[0].context.as_ref().unwrap();
    assert_eq!(context.match_path, "/home/dev/notes/draft.md");
}

#[test]
fn empty_query_returns_help_prompt() {
    let results = fixture_service().query("");
    assert_eq!(results.len(), 1);
    assert!(results[0].title.starts_with("Type a file or folder path"));
    assert!(results[0].action.is_none());
}

#[test]
fn bare_flag_token_returns_help_prompt() {
    let results = fixture_service().query(":fir");
    assert_eq!(results.len(), 1);
    assert!(results[0].title.starts_with("Type a file or folder path"));
}

#[test]
fn no_match_describes_active_modifiers() {
    let results = fixture_service().query(":if /nonexistent/path");
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].title,
        "There are no processes using '/nonexistent/path' with case insensitive and folder check"
    );
}

#[test]
fn malformed_regex_degrades_to_single_result() {
    let results = fixture_service().query(":r a[unclosed");
    assert_eq!(results.len(), 1);
    assert!(results[0].title.contains("not a valid regular expression"));
    assert!(results[0].action.is_none());
}

#[test]
fn query_results_are_capped_at_max_results() {
    let snapshots: Vec<ProcessSnapshot> = (1..=50)
        .map(|pid| {
            ProcessSnapshot::new(pid, 1_000, &format!("proc{pid}"))
                .with_open_files(&["/shared/data.bin"])
        })
        .collect();
    let service = CoreService::with_provider(
        Config {
            max_results: 10,
            ..Config::default()
        },
        Box::new(FixtureProvider::from_snapshots(snapshots)),
    )
    .unwrap();

    let results = service.query("/shared/data.bin");
    assert_eq!(results.len(), 10);
}

#[test]
fn terminate_action_with_stale_identity_reports_and_does_nothing() {
    let service = fixture_service();
    // A start time in the future can never belong to a live process.
    let response = service.action(&ActionToken::TerminateProcess {
        pid: std::process::id(),
        start_time: u64::MAX,
    });
    assert!(!response.performed);
    assert!(response.detail.unwrap().contains("start time"));
}

#[test]
fn kill_action_with_stale_identity_reports_and_does_nothing() {
    let service = fixture_service();
    let response = service.action(&ActionToken::KillProcess {
        pid: std::process::id(),
        start_time: u64::MAX,
    });
    assert!(!response.performed);
    assert!(response.detail.is_some());
}

#[test]
fn copy_action_never_panics() {
    // Headless environments have no clipboard; the response must still come
    // back as a value either way.
    let response = fixture_service().action(&ActionToken::Copy {
        text: "/tmp/a.txt".to_string(),
    });
    if response.performed {
        assert!(response.detail.is_none());
    } else {
        assert!(response.detail.is_some());
    }
}

#[test]
fn stale_context_returns_not_found_result() {
    let service = fixture_service();
    let results = service.context(&usedby_core::contract::ContextPayload {
        pid: std::process::id(),
        start_time: u64::MAX,
        match_path: "/tmp/a.txt".to_string(),
    });
    assert_eq!(results.len(), 1);
    assert_eq!(
        results[0].title,
        format!("Process with PID {} not found", std::process::id())
    );
}

#[test]
fn live_context_offers_the_full_menu() {
    let service = fixture_service();
    let start_time = own_start_time();
    let results = service.context(&usedby_core::contract::ContextPayload {
        pid: std::process::id(),
        start_time,
        match_path: "/tmp/a.txt".to_string(),
    });

    let titles: Vec<&str> = results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Open CWD",
            "Copy Match Path",
            "Copy Name",
            "Copy PID",
            "Copy CWD",
            "Copy Exe",
            "Copy Create Time",
            "Terminate Process",
            "Kill Process",
        ]
    );
    assert!(matches!(
        &results[0].action,
        Some(ActionToken::OpenWorkingDirectory { .. })
    ));
    assert!(matches!(
        &results[7].action,
        Some(ActionToken::TerminateProcess { pid, start_time: st })
            if *pid == std::process::id() && *st == start_time
    ));
}

#[cfg(target_os = "linux")]
#[test]
fn live_query_finds_the_process_holding_a_file_open() {
    use std::io::Write;

    let unique = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("usedby-live-query-{unique}.tmp"));
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"held open").unwrap();

    let canonical = std::fs::canonicalize(&path).unwrap();
    let service = CoreService::new(Config::default()).unwrap();
    let results = service.query(canonical.to_string_lossy().as_ref());

    let own_pid = std::process::id();
    assert!(
        results
            .iter()
            .any(|result| result.context.as_ref().is_some_and(|c| c.pid == own_pid)),
        "own process should be listed among {} result(s)",
        results.len()
    );

    drop(file);
    std::fs::remove_file(&path).unwrap();
}

fn own_start_time() -> u64 {
    use sysinfo::{Pid, System};
    let mut system = System::new();
    let pid = Pid::from_u32(std::process::id());
    assert!(system.refresh_process(pid));
    system.process(pid).unwrap().start_time()
}
