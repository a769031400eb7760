pub mod actuator;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod handles;
pub mod logging;
pub mod match_engine;
pub mod model;
pub mod query_mode;
pub mod results;
pub mod runtime;
pub mod scanner;
pub mod transport;
