//! HTTP client for the upstream employee service.
//!
//! Wraps the four REST calls the service exposes, decoding the
//! `{data, status, error}` envelope and classifying failures into the
//! closed [`ApiError`] set. Every operation runs under the retry policy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};

use crate::domain::errors::{ApiError, ApiResult};
use crate::domain::models::{
    Employee, EmployeeDeletion, EmployeeInput, ResponseEnvelope, UpstreamConfig,
};
use crate::domain::ports::EmployeeGateway;

use super::retry::RetryPolicy;

/// reqwest-backed client for the upstream employee service.
#[derive(Debug, Clone)]
pub struct EmployeeApiClient {
    /// The underlying HTTP client, reused for connection pooling.
    http: Client,
    /// Base URL, e.g. `http://localhost:8112/api/v1`.
    base_url: String,
    /// Retry policy applied to every operation.
    retry: RetryPolicy,
}

impl EmployeeApiClient {
    /// Create a new client against the configured upstream.
    pub fn new(config: &UpstreamConfig, retry: RetryPolicy) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;

        info!(
            base_url = %config.base_url,
            timeout_secs = config.timeout_secs,
            "initialized employee API client"
        );

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            retry,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Decode a successful HTTP response body as an envelope and unwrap it.
    ///
    /// A body that cannot be parsed as the envelope is a Server error, the
    /// same class the upstream uses for its own `status == ERROR` responses.
    async fn decode<T>(response: reqwest::Response) -> ApiResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let envelope: ResponseEnvelope<T> = response
            .json()
            .await
            .map_err(|e| ApiError::Server(format!("failed to decode upstream response: {e}")))?;
        envelope.into_data()
    }

    async fn fetch_all_once(&self) -> ApiResult<Vec<Employee>> {
        let response = self
            .http
            .get(self.url("/employee"))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        debug!(%status, "GET /employee");
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        Self::decode(response).await
    }

    async fn fetch_by_id_once(&self, id: &str) -> ApiResult<Employee> {
        let response = self
            .http
            .get(self.url(&format!("/employee/{id}")))
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        debug!(%status, id, "GET /employee/{{id}}");
        // 404 on the lookup path resolves to NotFound, checked before the
        // generic 4xx rule.
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(id.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        Self::decode(response).await
    }

    async fn create_once(&self, input: &EmployeeInput) -> ApiResult<Employee> {
        let response = self
            .http
            .post(self.url("/employee"))
            .json(input)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        debug!(%status, "POST /employee");
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        Self::decode(response).await
    }

    async fn delete_once(&self, name: &str) -> ApiResult<bool> {
        let body = EmployeeDeletion {
            name: name.to_string(),
        };
        let response = self
            .http
            .delete(self.url("/employee"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        debug!(%status, name, "DELETE /employee");
        if !status.is_success() {
            return Err(ApiError::from_status(status));
        }

        Self::decode(response).await
    }
}

#[async_trait]
impl EmployeeGateway for EmployeeApiClient {
    #[instrument(skip(self))]
    async fn fetch_all(&self) -> ApiResult<Vec<Employee>> {
        self.retry.execute(|| self.fetch_all_once()).await
    }

    #[instrument(skip(self))]
    async fn fetch_by_id(&self, id: &str) -> ApiResult<Employee> {
        self.retry.execute(|| self.fetch_by_id_once(id)).await
    }

    #[instrument(skip(self, input))]
    async fn create(&self, input: &EmployeeInput) -> ApiResult<Employee> {
        self.retry.execute(|| self.create_once(input)).await
    }

    #[instrument(skip(self))]
    async fn delete_by_name(&self, name: &str) -> ApiResult<bool> {
        self.retry.execute(|| self.delete_once(name)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = UpstreamConfig {
            base_url: "http://localhost:8112/api/v1/".to_string(),
            timeout_secs: 30,
        };
        let client = EmployeeApiClient::new(&config, RetryPolicy::default()).unwrap();
        assert_eq!(client.url("/employee"), "http://localhost:8112/api/v1/employee");
    }

    #[test]
    fn test_client_creation() {
        let config = UpstreamConfig::default();
        assert!(EmployeeApiClient::new(&config, RetryPolicy::default()).is_ok());
    }
}
