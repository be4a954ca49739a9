//! Rosterline - resilient client layer for the mock employee API.
//!
//! Rosterline fronts a rate-limited upstream employee service with a typed,
//! retrying HTTP client and a single-slot collection cache. The upstream
//! wraps every payload in a `{data, status, error}` envelope; this crate
//! normalizes that envelope, classifies failures into a closed error set,
//! retries rate-limited calls with jittered exponential backoff, and serves
//! the full-collection read through a TTL-swept, single-flight cache.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): employee models, the response envelope,
//!   the error taxonomy, and the upstream gateway port
//! - **Service Layer** (`services`): the [`EmployeeService`] facade consumed
//!   by the routing layer above this crate
//! - **Infrastructure Layer** (`infrastructure`): reqwest transport, retry
//!   policy, collection cache, configuration, and logging setup
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use rosterline::{Config, EmployeeApiClient, EmployeeService, RetryPolicy};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = EmployeeApiClient::new(
//!         &config.upstream,
//!         RetryPolicy::from_config(&config.retry),
//!     )?;
//!     let service = EmployeeService::new(Arc::new(client), &config.cache);
//!     let employees = service.get_all_employees().await?;
//!     println!("{} employees", employees.len());
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{ApiError, ApiResult};
pub use domain::models::{
    CacheConfig, Config, Employee, EmployeeInput, EnvelopeStatus, LoggingConfig, ResponseEnvelope,
    RetryConfig, UpstreamConfig,
};
pub use domain::ports::EmployeeGateway;
pub use infrastructure::cache::CollectionCache;
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::upstream::{EmployeeApiClient, RetryPolicy};
pub use services::EmployeeService;
