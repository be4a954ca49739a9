//! Employee service facade.
//!
//! Everything the routing layer above this crate calls goes through here.
//! Collection reads are served through the single-slot cache; id lookup,
//! create, and delete hit the gateway directly, with create and delete
//! evicting the cache once the upstream confirms the write.

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::{CacheConfig, Employee, EmployeeInput};
use crate::domain::ports::EmployeeGateway;
use crate::infrastructure::cache::CollectionCache;

/// Maximum number of names returned by the top-earners aggregation.
const TOP_EARNERS_LIMIT: usize = 10;

/// Facade over the upstream gateway, the collection cache, and the
/// aggregations derived from the cached collection.
pub struct EmployeeService {
    gateway: Arc<dyn EmployeeGateway>,
    cache: Arc<CollectionCache>,
    sweeper: JoinHandle<()>,
}

impl EmployeeService {
    /// Create the service and start the background cache sweep.
    ///
    /// Must be called within a tokio runtime; the sweep task is aborted
    /// when the service is dropped.
    pub fn new(gateway: Arc<dyn EmployeeGateway>, config: &CacheConfig) -> Self {
        let cache = Arc::new(CollectionCache::new());
        let sweeper = CollectionCache::spawn_sweep(
            Arc::clone(&cache),
            Duration::from_secs(config.sweep_period_secs),
        );

        Self {
            gateway,
            cache,
            sweeper,
        }
    }

    /// The full employee collection, served from the cache when populated.
    #[instrument(skip(self))]
    pub async fn get_all_employees(&self) -> ApiResult<Arc<Vec<Employee>>> {
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_populate(move || async move { gateway.fetch_all().await }.boxed())
            .await
    }

    /// All employees whose name contains the query, case-insensitively,
    /// original order preserved. An exact case-insensitive match is also
    /// accepted, though the containment check already covers it.
    #[instrument(skip(self))]
    pub async fn search_by_name(&self, query: &str) -> ApiResult<Vec<Employee>> {
        let needle = query.to_lowercase();
        let employees = self.get_all_employees().await?;

        Ok(employees
            .iter()
            .filter(|employee| {
                let name = employee.name.to_lowercase();
                name.contains(&needle) || name == needle
            })
            .cloned()
            .collect())
    }

    /// Single-record lookup by id, bypassing the cache.
    #[instrument(skip(self))]
    pub async fn get_employee_by_id(&self, id: &str) -> ApiResult<Employee> {
        self.gateway.fetch_by_id(id).await
    }

    /// The maximum salary across the collection. Fails with
    /// [`ApiError::EmptyCollection`] when there are no employees, never
    /// a sentinel value.
    #[instrument(skip(self))]
    pub async fn highest_salary(&self) -> ApiResult<u32> {
        let employees = self.get_all_employees().await?;
        employees
            .iter()
            .map(|employee| employee.salary)
            .max()
            .ok_or(ApiError::EmptyCollection)
    }

    /// Names of the ten highest-paid employees, salary descending. Ties
    /// keep their original relative order; fewer than ten records return
    /// them all.
    #[instrument(skip(self))]
    pub async fn top_ten_earner_names(&self) -> ApiResult<Vec<String>> {
        let employees = self.get_all_employees().await?;

        let mut ranked: Vec<&Employee> = employees.iter().collect();
        // sort_by is stable, so equal salaries keep their fetch order.
        ranked.sort_by(|a, b| b.salary.cmp(&a.salary));

        Ok(ranked
            .into_iter()
            .take(TOP_EARNERS_LIMIT)
            .map(|employee| employee.name.clone())
            .collect())
    }

    /// Create an employee upstream, then evict the cached collection so the
    /// next read re-fetches the authoritative state.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_employee(&self, input: EmployeeInput) -> ApiResult<Employee> {
        let created = self.gateway.create(&input).await?;
        info!(id = %created.id, "employee created, evicting cache");
        self.cache.evict().await;
        Ok(created)
    }

    /// Delete an employee by id.
    ///
    /// The upstream delete call is keyed by name, so the record is fetched
    /// first to resolve it. A confirmed deletion evicts the cached
    /// collection; a failed one leaves it untouched.
    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: &str) -> ApiResult<bool> {
        let employee = self.gateway.fetch_by_id(id).await?;
        let deleted = self.gateway.delete_by_name(&employee.name).await?;
        info!(id, deleted, "employee deletion confirmed, evicting cache");
        self.cache.evict().await;
        Ok(deleted)
    }

    /// The cache behind the collection read path, exposed for tests and
    /// operational introspection.
    pub fn cache(&self) -> &CollectionCache {
        &self.cache
    }
}

impl Drop for EmployeeService {
    fn drop(&mut self) {
        self.sweeper.abort();
    }
}
