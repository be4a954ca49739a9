//! Infrastructure layer: transport, retry, cache, configuration, logging.

pub mod cache;
pub mod config;
pub mod logging;
pub mod upstream;
