use usedby_core::match_engine::find_matches;
use usedby_core::model::ProcessSnapshot;
use usedby_core::query_mode::{MatchMode, ParsedQuery};

fn snapshots() -> Vec<ProcessSnapshot> {
    vec![
        ProcessSnapshot::new(10, 100, "alpha")
            .with_cwd("/srv/alpha")
            .with_open_files(&["/srv/alpha/data.db", "/var/log/alpha.log"]),
        ProcessSnapshot::new(20, 200, "beta")
            .with_cwd("/srv/beta")
            .with_open_files(&["/var/log/beta.log"]),
        ProcessSnapshot::new(30, 300, "gamma").with_cwd("/srv/alpha"),
    ]
}

fn parse_mode(raw: &str) -> (MatchMode, String) {
    match ParsedQuery::parse(raw) {
        ParsedQuery::Search { mode, term } => (mode, term),
        ParsedQuery::Empty => panic!("expected a search query from {raw:?}"),
    }
}

#[test]
fn parsed_mode_feeds_straight_into_the_engine() {
    let (mode, term) = parse_mode(":ri ALPHA\\.LOG$");
    let records = find_matches(&snapshots(), &mode, &term).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid, 10);
    assert_eq!(records[0].match_path, "/var/log/alpha.log");
}

#[test]
fn folder_check_adds_cwd_only_processes() {
    let (mode, term) = parse_mode(":rf ^/srv/alpha");
    let records = find_matches(&snapshots(), &mode, &term).unwrap();
    let pids: Vec<u32> = records.iter().map(|record| record.pid).collect();
    assert_eq!(pids, vec![10, 30]);
    // alpha matched an open file; gamma only its working directory.
    assert_eq!(records[0].match_path, "/srv/alpha/data.db");
    assert_eq!(records[1].match_path, "/srv/alpha");
}

#[test]
fn case_insensitive_exact_match_via_prefix() {
    let (mode, term) = parse_mode(":i /VAR/LOG/BETA.LOG");
    let records = find_matches(&snapshots(), &mode, &term).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid, 20);
}

#[test]
fn each_process_contributes_at_most_one_record() {
    let (mode, term) = parse_mode(":rf .");
    let records = find_matches(&snapshots(), &mode, &term).unwrap();
    assert_eq!(records.len(), 3);
    let mut pids: Vec<u32> = records.iter().map(|record| record.pid).collect();
    pids.dedup();
    assert_eq!(pids.len(), 3);
}
