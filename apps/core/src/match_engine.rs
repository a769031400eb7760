use std::fmt::{Display, Formatter};

use regex::{Regex, RegexBuilder};

use crate::model::{normalize_path, MatchRecord, ProcessSnapshot};
use crate::query_mode::MatchMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    Pattern { pattern: String, detail: String },
}

impl Display for MatchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pattern { pattern, detail } => {
                write!(f, "invalid pattern '{pattern}': {detail}")
            }
        }
    }
}

impl std::error::Error for MatchError {}

/// Runs the parsed mode and term against every snapshot, in snapshot order.
/// A process contributes at most one record: its first matching open file,
/// or its working directory when `check_folder` is set and no open file
/// matched.
pub fn find_matches(
    snapshots: &[ProcessSnapshot],
    mode: &MatchMode,
    term: &str,
) -> Result<Vec<MatchRecord>, MatchError> {
    let matcher = PathMatcher::new(term, mode)?;

    let mut records = Vec::new();
    for snapshot in snapshots {
        let matched_open_file = snapshot
            .open_files
            .iter()
            .find(|path| matcher.matches(path));

        let matched_path = matched_open_file.or_else(|| {
            if mode.check_folder {
                snapshot.cwd.as_ref().filter(|cwd| matcher.matches(cwd))
            } else {
                None
            }
        });

        if let Some(path) = matched_path {
            records.push(MatchRecord::from_snapshot(snapshot, path));
        }
    }
    Ok(records)
}

enum PathMatcher {
    Exact { term: String, fold_case: bool },
    Pattern { regex: Regex, fold_case: bool },
}

impl PathMatcher {
    fn new(term: &str, mode: &MatchMode) -> Result<Self, MatchError> {
        if mode.use_regex {
            let regex = RegexBuilder::new(term)
                .case_insensitive(mode.case_insensitive)
                .build()
                .map_err(|error| MatchError::Pattern {
                    pattern: term.to_string(),
                    detail: error.to_string(),
                })?;
            return Ok(Self::Pattern {
                regex,
                fold_case: mode.case_insensitive,
            });
        }

        Ok(Self::Exact {
            term: normalize_path(term, mode.case_insensitive),
            fold_case: mode.case_insensitive,
        })
    }

    fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Exact { term, fold_case } => normalize_path(candidate, *fold_case) == *term,
            // Search semantics: the pattern may hit anywhere in the path.
            Self::Pattern { regex, fold_case } => {
                regex.is_match(&normalize_path(candidate, *fold_case))
            }
        }
    }
}
