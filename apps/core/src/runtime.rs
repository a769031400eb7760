use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{self, ConfigError};
use crate::core_service::{CoreService, ServiceError};
use crate::logging;
use crate::transport;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Service(ServiceError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Service(error) => write!(f, "service error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<ServiceError> for RuntimeError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    /// Single request to answer instead of serving the stdin loop.
    pub request: Option<String>,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--config requires a path".to_string())?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--request" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--request requires a json payload".to_string())?;
                options.request = Some(value.clone());
            }
            unknown => return Err(format!("unknown argument '{unknown}'")),
        }
    }

    Ok(options)
}

/// Starts the core. stdout carries exactly one JSON response per request
/// line; everything else goes to the log file.
pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    if let Err(error) = logging::init() {
        eprintln!("[usedby-core] logging unavailable: {error}");
    }

    let config = config::load(options.config_path.as_deref())?;
    if !config.config_path.exists() {
        config::save(&config)?;
        logging::info(&format!(
            "wrote default config to {}",
            config.config_path.display()
        ));
    }
    logging::info(&format!(
        "startup max_results={} config_path={}",
        config.max_results,
        config.config_path.display()
    ));

    let service = CoreService::new(config)?;

    if let Some(request) = options.request {
        respond(&service, &request)?;
        return Ok(());
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        respond(&service, &line)?;
    }
    logging::info("stdin closed, shutting down");
    Ok(())
}

fn respond(service: &CoreService, request: &str) -> Result<(), std::io::Error> {
    let response = transport::handle_json(service, request);
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{response}")?;
    stdout.flush()
}
