//! Ports: the upstream gateway contract the service layer depends on.

use async_trait::async_trait;

use crate::domain::errors::ApiResult;
use crate::domain::models::{Employee, EmployeeInput};

/// The four network operations against the upstream employee service.
///
/// Implementations are expected to apply the retry policy to every
/// operation identically; the service layer adds caching on top of
/// `fetch_all` and write-through eviction after `create` / `delete_by_name`.
#[async_trait]
pub trait EmployeeGateway: Send + Sync {
    /// Fetch the full employee collection.
    async fn fetch_all(&self) -> ApiResult<Vec<Employee>>;

    /// Fetch a single employee by id. A 404 surfaces as
    /// [`ApiError::NotFound`](crate::domain::errors::ApiError::NotFound)
    /// carrying the requested id.
    async fn fetch_by_id(&self, id: &str) -> ApiResult<Employee>;

    /// Create an employee and return the record the upstream assigned.
    async fn create(&self, input: &EmployeeInput) -> ApiResult<Employee>;

    /// Delete an employee by name (the upstream's deletion key).
    async fn delete_by_name(&self, name: &str) -> ApiResult<bool>;
}
