/// Matching flags for one query, computed once during parsing and threaded
/// through matching unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchMode {
    pub use_regex: bool,
    pub case_insensitive: bool,
    pub check_folder: bool,
}

impl MatchMode {
    /// Human-readable names of the active flags, in presentation order.
    pub fn active_modifier_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();
        if self.case_insensitive {
            labels.push("case insensitive");
        }
        if self.use_regex {
            labels.push("regex");
        }
        if self.check_folder {
            labels.push("folder check");
        }
        labels
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedQuery {
    /// Nothing to search for: blank input, a bare `:`, or a flag token with
    /// no term after it. Callers render the help prompt instead of scanning.
    Empty,
    Search { mode: MatchMode, term: String },
}

impl ParsedQuery {
    /// Strips at most one `:`-prefixed flag token (letters `r`, `i`, `f` in
    /// any order, each at most once, case-insensitive) followed by
    /// whitespace. Anything else starting with `:` is a literal term.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }

        let Some(rest) = trimmed.strip_prefix(':') else {
            return Self::Search {
                mode: MatchMode::default(),
                term: trimmed.to_string(),
            };
        };

        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..token_end];
        let remainder = rest[token_end..].trim();

        if token.is_empty() {
            // Bare ":" means no term; ": something" has no flag token.
            return if remainder.is_empty() {
                Self::Empty
            } else {
                Self::Search {
                    mode: MatchMode::default(),
                    term: trimmed.to_string(),
                }
            };
        }

        let Some(mode) = parse_flag_token(token) else {
            return Self::Search {
                mode: MatchMode::default(),
                term: trimmed.to_string(),
            };
        };

        if remainder.is_empty() {
            return Self::Empty;
        }

        Self::Search {
            mode,
            term: remainder.to_string(),
        }
    }
}

fn parse_flag_token(token: &str) -> Option<MatchMode> {
    if token.len() > 3 {
        return None;
    }

    let mut mode = MatchMode::default();
    for letter in token.chars() {
        match letter.to_ascii_lowercase() {
            'r' if !mode.use_regex => mode.use_regex = true,
            'i' if !mode.case_insensitive => mode.case_insensitive = true,
            'f' if !mode.check_folder => mode.check_folder = true,
            // Unknown letter or a duplicate: not a flag token.
            _ => return None,
        }
    }
    Some(mode)
}
