//! Domain models: employee records, the upstream envelope, configuration.

mod config;
mod employee;
mod envelope;

pub use config::{CacheConfig, Config, LoggingConfig, RetryConfig, UpstreamConfig};
pub use employee::{Employee, EmployeeDeletion, EmployeeInput};
pub use envelope::{EnvelopeStatus, ResponseEnvelope};
