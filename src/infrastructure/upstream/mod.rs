//! Upstream HTTP transport and retry policy.

mod client;
mod retry;

pub use client::EmployeeApiClient;
pub use retry::RetryPolicy;
