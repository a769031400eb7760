use crate::actuator::{self, ActuatorError};
use crate::config::{validate, Config};
use crate::contract::{
    ActionResponse, ActionToken, ContextPayload, ContextResponse, CoreRequest, CoreResponse,
    QueryResponse, ResultDto,
};
use crate::logging;
use crate::match_engine::{self, MatchError};
use crate::query_mode::ParsedQuery;
use crate::results;
use crate::scanner::{LiveProcessProvider, ProcessProvider};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
        }
    }
}

impl std::error::Error for ServiceError {}

pub struct CoreService {
    config: Config,
    provider: Box<dyn ProcessProvider>,
}

impl CoreService {
    pub fn new(config: Config) -> Result<Self, ServiceError> {
        Self::with_provider(config, Box::new(LiveProcessProvider::new()))
    }

    pub fn with_provider(
        config: Config,
        provider: Box<dyn ProcessProvider>,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        Ok(Self { config, provider })
    }

    pub fn handle_command(&self, request: CoreRequest) -> Result<CoreResponse, ServiceError> {
        match request {
            CoreRequest::Query(payload) => Ok(CoreResponse::Query(QueryResponse {
                results: self.query(&payload.query),
            })),
            CoreRequest::Context(payload) => Ok(CoreResponse::Context(ContextResponse {
                results: self.context(&payload.context),
            })),
            CoreRequest::Action(payload) => {
                Ok(CoreResponse::Action(self.action(&payload.token)))
            }
        }
    }

    /// One full scan-and-match pass. Infallible by design: every failure
    /// mode renders as a result the host can show.
    pub fn query(&self, raw: &str) -> Vec<ResultDto> {
        let (mode, term) = match ParsedQuery::parse(raw) {
            ParsedQuery::Empty => return vec![results::help_result()],
            ParsedQuery::Search { mode, term } => (mode, term),
        };

        let snapshots = self.provider.snapshot();
        logging::info(&format!(
            "query term='{term}' provider={} scanned={}",
            self.provider.provider_name(),
            snapshots.len()
        ));

        match match_engine::find_matches(&snapshots, &mode, &term) {
            Ok(records) if records.is_empty() => vec![results::no_match_result(&term, &mode)],
            Ok(records) => records
                .iter()
                .take(self.config.max_results as usize)
                .map(results::match_result)
                .collect(),
            Err(MatchError::Pattern { pattern, detail }) => {
                logging::warn(&format!("rejected pattern '{pattern}': {detail}"));
                vec![results::invalid_pattern_result(&pattern, &detail)]
            }
        }
    }

    /// Context menu for a previously returned result. The stored identity is
    /// re-checked against the live table; a recycled or exited pid renders
    /// as a stale-identity result instead of a menu.
    pub fn context(&self, payload: &ContextPayload) -> Vec<ResultDto> {
        match actuator::resolve(payload.pid, payload.start_time) {
            Ok(process) => results::context_menu(payload, &process),
            Err(error) => {
                logging::info(&format!("context lookup failed: {error}"));
                vec![results::stale_identity_result(payload.pid)]
            }
        }
    }

    /// Dispatches a deferred action token. Failures are reported in the
    /// response, never raised: the host stays responsive whatever the OS
    /// says about the target process.
    pub fn action(&self, token: &ActionToken) -> ActionResponse {
        let outcome = match token {
            ActionToken::Copy { text } => actuator::copy(text).map(|_| true),
            ActionToken::OpenWorkingDirectory { path } => actuator::open_working_directory(path),
            ActionToken::TerminateProcess { pid, start_time } => {
                actuator::terminate(*pid, *start_time).map(|_| true)
            }
            ActionToken::KillProcess { pid, start_time } => {
                actuator::kill(*pid, *start_time).map(|_| true)
            }
        };

        match outcome {
            Ok(performed) => ActionResponse {
                performed,
                detail: None,
            },
            Err(error @ ActuatorError::StaleIdentity { .. }) => ActionResponse {
                performed: false,
                detail: Some(error.to_string()),
            },
            Err(error) => {
                logging::error(&format!("action failed: {error}"));
                ActionResponse {
                    performed: false,
                    detail: Some(error.to_string()),
                }
            }
        }
    }
}
